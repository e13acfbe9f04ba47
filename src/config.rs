//! Engine configuration, loadable from JSON.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RasterFxError, RasterFxResult};

/// How a source image is fitted into the display area.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FitOpts {
    /// Pixels subtracted from both viewport dimensions.
    pub margin: u32,
    /// Lower bound on the fitted width budget.
    pub min_width: u32,
    /// Lower bound on the fitted height budget.
    pub min_height: u32,
    /// Horizontal space reserved for side panels.
    pub reserved_width: u32,
}

impl Default for FitOpts {
    fn default() -> Self {
        Self {
            margin: 18,
            min_width: 320,
            min_height: 220,
            reserved_width: 0,
        }
    }
}

/// Defaults for animated export.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// Frames captured per animation.
    pub frame_count: u32,
    /// Delay between frames in milliseconds.
    pub delay_ms: u32,
    /// GIF quantizer speed (1 = best quality, 30 = fastest).
    pub gif_speed: i32,
    /// Seed for falling-head motion during capture.
    pub capture_seed: u32,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            frame_count: 36,
            delay_ms: 50,
            gif_speed: 10,
            capture_seed: 0x5eed,
        }
    }
}

/// Where glyph outlines come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontOpts {
    /// Search installed fonts for the glyph font stack.
    pub system_fonts: bool,
    /// Extra font files, tried before the built-in stack.
    pub files: Vec<PathBuf>,
}

impl Default for FontOpts {
    fn default() -> Self {
        Self {
            system_fonts: true,
            files: Vec::new(),
        }
    }
}

/// Top-level engine options.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineOpts {
    /// Viewport fitting.
    pub fit: FitOpts,
    /// Animated export defaults.
    pub export: ExportOpts,
    /// Glyph fonts.
    pub fonts: FontOpts,
}

impl EngineOpts {
    /// Parse options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> RasterFxResult<Self> {
        let opts: EngineOpts =
            serde_json::from_str(s).context("parse engine options JSON")?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RasterFxResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read engine options '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> RasterFxResult<()> {
        if self.fit.min_width == 0 || self.fit.min_height == 0 {
            return Err(RasterFxError::validation(
                "fit.min_width/min_height must be non-zero",
            ));
        }
        if self.export.frame_count == 0 {
            return Err(RasterFxError::validation(
                "export.frame_count must be non-zero",
            ));
        }
        if !(1..=30).contains(&self.export.gif_speed) {
            return Err(RasterFxError::validation(
                "export.gif_speed must be within 1..=30",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
