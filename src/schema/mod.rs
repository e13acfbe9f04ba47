//! Static effect catalog: identifiers, labels and ordered control descriptors.

pub(crate) mod ramps;

use std::str::FromStr;
use std::sync::OnceLock;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{RasterFxError, RasterFxResult};

/// Identifier of a built-in effect.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EffectId {
    /// Mosaic-Glyph.
    Ascii,
    /// Ordered (Bayer) dithering.
    Dithering,
    /// Halftone dots.
    Halftone,
    /// Falling-Stream glyph rain.
    Matrix,
    /// Luma-sized dots.
    Dots,
    /// Edge detection with fixed parameters.
    Contour,
    /// Per-row luma sort.
    PixelSort,
    /// Nearest-neighbor pixelation.
    Blockify,
    /// Binary luma cutoff.
    Threshold,
    /// Sobel edge detection.
    Edge,
    /// Tiered diagonal hatching.
    Crosshatch,
    /// Sinusoidal row displacement.
    WaveLines,
    /// Uniform gray noise.
    NoiseField,
    /// Flat-color Voronoi cells.
    Voronoi,
    /// Channel shift, jitter and scanlines.
    Vhs,
}

impl EffectId {
    /// Every effect, in display order.
    pub const ALL: [EffectId; 15] = [
        EffectId::Ascii,
        EffectId::Dithering,
        EffectId::Halftone,
        EffectId::Matrix,
        EffectId::Dots,
        EffectId::Contour,
        EffectId::PixelSort,
        EffectId::Blockify,
        EffectId::Threshold,
        EffectId::Edge,
        EffectId::Crosshatch,
        EffectId::WaveLines,
        EffectId::NoiseField,
        EffectId::Voronoi,
        EffectId::Vhs,
    ];

    /// Stable string identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            EffectId::Ascii => "ascii",
            EffectId::Dithering => "dithering",
            EffectId::Halftone => "halftone",
            EffectId::Matrix => "matrix",
            EffectId::Dots => "dots",
            EffectId::Contour => "contour",
            EffectId::PixelSort => "pixelsort",
            EffectId::Blockify => "blockify",
            EffectId::Threshold => "threshold",
            EffectId::Edge => "edge",
            EffectId::Crosshatch => "crosshatch",
            EffectId::WaveLines => "wavelines",
            EffectId::NoiseField => "noisefield",
            EffectId::Voronoi => "voronoi",
            EffectId::Vhs => "vhs",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            EffectId::Ascii => "ASCII",
            EffectId::Dithering => "Dithering",
            EffectId::Halftone => "Halftone",
            EffectId::Matrix => "Matrix Rain",
            EffectId::Dots => "Dots",
            EffectId::Contour => "Contour",
            EffectId::PixelSort => "Pixel Sort",
            EffectId::Blockify => "Blockify",
            EffectId::Threshold => "Threshold",
            EffectId::Edge => "Edge Detection",
            EffectId::Crosshatch => "Crosshatch",
            EffectId::WaveLines => "Wave Lines",
            EffectId::NoiseField => "Noise Field",
            EffectId::Voronoi => "Voronoi",
            EffectId::Vhs => "VHS",
        }
    }

    /// Effects whose output changes with the animation clock.
    pub fn is_time_dependent(self) -> bool {
        matches!(self, EffectId::Matrix | EffectId::WaveLines | EffectId::Vhs)
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectId {
    type Err = RasterFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RasterFxError::validation(format!("unknown effect '{s}'")))
    }
}

/// A single parameter value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Continuous range value.
    Number(f64),
    /// Checkbox value.
    Flag(bool),
    /// Color value, serialized as `#rrggbb`.
    Color(Rgb8),
    /// One of a choice's options.
    Choice(String),
}

impl ParamValue {
    /// Short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParamValue::Number(_) => "number",
            ParamValue::Flag(_) => "boolean",
            ParamValue::Color(_) => "color",
            ParamValue::Choice(_) => "choice",
        }
    }

    /// Parse a command-line style value for the given control kind.
    pub fn parse_for(kind: &ControlKind, raw: &str) -> RasterFxResult<Self> {
        let raw = raw.trim();
        match kind {
            ControlKind::Range { .. } => raw
                .parse::<f64>()
                .map(ParamValue::Number)
                .map_err(|e| RasterFxError::validation(format!("'{raw}' is not a number: {e}"))),
            ControlKind::Flag => match raw {
                "true" | "1" | "on" | "yes" => Ok(ParamValue::Flag(true)),
                "false" | "0" | "off" | "no" => Ok(ParamValue::Flag(false)),
                _ => Err(RasterFxError::validation(format!(
                    "'{raw}' is not a boolean"
                ))),
            },
            ControlKind::Color => Rgb8::from_hex(raw).map(ParamValue::Color),
            ControlKind::Choice { .. } => Ok(ParamValue::Choice(raw.to_owned())),
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Flag(v) => write!(f, "{v}"),
            ParamValue::Color(c) => f.write_str(&c.to_hex()),
            ParamValue::Choice(s) => f.write_str(s),
        }
    }
}

/// Domain of a control.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlKind {
    /// Continuous range `[min, max]` with a UI step.
    Range {
        /// Inclusive minimum.
        min: f64,
        /// Inclusive maximum.
        max: f64,
        /// UI step size.
        step: f64,
    },
    /// One of a fixed option set.
    Choice {
        /// Allowed options.
        options: &'static [&'static str],
    },
    /// Boolean toggle.
    Flag,
    /// RGB color.
    Color,
}

/// Descriptor of one tunable control.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlDescriptor {
    /// Key, unique within its effect.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Display section.
    pub section: &'static str,
    /// Domain.
    pub kind: ControlKind,
    /// Default value.
    pub default: ParamValue,
}

impl ControlDescriptor {
    /// Check that `value` belongs to this control's domain.
    pub fn validate(&self, value: &ParamValue) -> RasterFxResult<()> {
        match (&self.kind, value) {
            (ControlKind::Range { min, max, .. }, ParamValue::Number(v)) => {
                if !v.is_finite() || *v < *min || *v > *max {
                    return Err(RasterFxError::validation(format!(
                        "'{}' must be within [{min}, {max}], got {v}",
                        self.key
                    )));
                }
                Ok(())
            }
            (ControlKind::Choice { options }, ParamValue::Choice(s)) => {
                if !options.contains(&s.as_str()) {
                    return Err(RasterFxError::validation(format!(
                        "'{}' must be one of {options:?}, got '{s}'",
                        self.key
                    )));
                }
                Ok(())
            }
            (ControlKind::Flag, ParamValue::Flag(_)) | (ControlKind::Color, ParamValue::Color(_)) => {
                Ok(())
            }
            (_, other) => Err(RasterFxError::validation(format!(
                "'{}' does not accept a {} value",
                self.key,
                other.kind_name()
            ))),
        }
    }
}

/// An effect and its ordered controls.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectDescriptor {
    /// Identifier.
    pub id: EffectId,
    /// Display label.
    pub label: &'static str,
    /// Ordered controls.
    pub controls: Vec<ControlDescriptor>,
}

impl EffectDescriptor {
    /// Look up a control by key.
    pub fn control(&self, key: &str) -> Option<&ControlDescriptor> {
        self.controls.iter().find(|c| c.key == key)
    }
}

/// The full, immutable effect catalog.
#[derive(Debug)]
pub struct Schema {
    effects: Vec<EffectDescriptor>,
}

impl Schema {
    /// The built-in catalog, constructed once per process.
    pub fn builtin() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(build_catalog)
    }

    /// Effects in display order.
    pub fn effects(&self) -> &[EffectDescriptor] {
        &self.effects
    }

    /// Descriptor for `id`.
    pub fn effect(&self, id: EffectId) -> RasterFxResult<&EffectDescriptor> {
        self.effects
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| RasterFxError::validation(format!("effect '{id}' is not in the schema")))
    }
}

const CHARSETS_ASCII: &[&str] = &[
    "STANDARD",
    "BLOCKS",
    "NUMERIC",
    "SYMBOL",
    "HIRAGANA",
    "KANJI",
    "JAPANESE_MIX",
];
const CHARSETS_MATRIX: &[&str] = &["BLOCKS", "NUMERIC", "SYMBOL", "STANDARD"];
const SHAPES: &[&str] = &["Circle", "Square"];

fn range(
    key: &'static str,
    label: &'static str,
    section: &'static str,
    (min, max, step): (f64, f64, f64),
    default: f64,
) -> ControlDescriptor {
    ControlDescriptor {
        key,
        label,
        section,
        kind: ControlKind::Range { min, max, step },
        default: ParamValue::Number(default),
    }
}

fn choice(
    key: &'static str,
    label: &'static str,
    section: &'static str,
    options: &'static [&'static str],
    default: &'static str,
) -> ControlDescriptor {
    ControlDescriptor {
        key,
        label,
        section,
        kind: ControlKind::Choice { options },
        default: ParamValue::Choice(default.to_owned()),
    }
}

fn flag(key: &'static str, label: &'static str, section: &'static str) -> ControlDescriptor {
    ControlDescriptor {
        key,
        label,
        section,
        kind: ControlKind::Flag,
        default: ParamValue::Flag(false),
    }
}

fn color(
    key: &'static str,
    label: &'static str,
    section: &'static str,
    default: Rgb8,
) -> ControlDescriptor {
    ControlDescriptor {
        key,
        label,
        section,
        kind: ControlKind::Color,
        default: ParamValue::Color(default),
    }
}

fn controls_for(id: EffectId) -> Vec<ControlDescriptor> {
    match id {
        EffectId::Ascii => vec![
            range("scale", "Scale", "ASCII", (0.4, 4.0, 0.1), 1.0),
            range("spacing", "Spacing", "ASCII", (0.0, 1.0, 0.1), 0.6),
            range("outputWidth", "Output Width", "ASCII", (64.0, 240.0, 1.0), 120.0),
            choice("characterSet", "Character Set", "ASCII", CHARSETS_ASCII, "STANDARD"),
            range("brightness", "Brightness", "Adjustments", (-100.0, 100.0, 1.0), 0.0),
            range("contrast", "Contrast", "Adjustments", (-100.0, 100.0, 1.0), 0.0),
            range("saturation", "Saturation", "Adjustments", (-100.0, 100.0, 1.0), 0.0),
            range("hueRotation", "Hue Rotation", "Adjustments", (-180.0, 180.0, 1.0), 0.0),
            range("sharpness", "Sharpness", "Adjustments", (0.0, 4.0, 0.1), 0.0),
            range("gamma", "Gamma", "Adjustments", (0.3, 2.0, 0.1), 1.0),
            choice("mode", "Mode", "Color", &["Original", "Monochrome"], "Original"),
            range("backgroundIntensity", "Background Intensity", "Color", (0.0, 2.0, 0.1), 1.3),
            flag("invert", "Invert", "Processing"),
            range("brightnessMap", "Brightness Map", "Processing", (0.4, 2.2, 0.1), 1.0),
        ],
        EffectId::Matrix => vec![
            choice("characterSet", "Character Set", "Matrix Rain", CHARSETS_MATRIX, "BLOCKS"),
            range("cellSize", "Cell Size", "Matrix Rain", (8.0, 30.0, 1.0), 16.0),
            range("spacing", "Spacing", "Matrix Rain", (0.0, 1.0, 0.1), 0.0),
            range("speed", "Speed", "Matrix Rain", (0.2, 2.0, 0.1), 0.8),
            range("trailLength", "Trail Length", "Matrix Rain", (6.0, 50.0, 1.0), 30.0),
            choice("direction", "Direction", "Matrix Rain", &["Down", "Up"], "Down"),
            range("glow", "Glow", "Matrix Rain", (0.0, 2.4, 0.1), 1.4),
            range("bgOpacity", "BG Opacity", "Matrix Rain", (0.05, 0.95, 0.05), 0.4),
            range("brightness", "Brightness", "Adjustments", (40.0, 160.0, 1.0), 100.0),
            range("contrast", "Contrast", "Adjustments", (40.0, 180.0, 1.0), 100.0),
            range("threshold", "Threshold", "Adjustments", (0.0, 1.0, 0.05), 0.2),
            color("rainColor", "Rain Color", "Color", Rgb8::new(0xe3, 0x24, 0x00)),
        ],
        EffectId::Dots => vec![
            choice("shape", "Shape", "Dots", SHAPES, "Circle"),
            choice("gridType", "Grid Type", "Dots", &["Square Grid", "Offset Grid"], "Square Grid"),
            range("size", "Size", "Dots", (0.4, 2.2, 0.1), 1.3),
            range("spacing", "Spacing", "Dots", (0.4, 2.0, 0.1), 1.0),
            flag("invert", "Invert", "Dots"),
        ],
        EffectId::Edge => vec![
            range("strength", "Strength", "Edge Detection", (0.5, 3.0, 0.1), 1.4),
            range("threshold", "Threshold", "Edge Detection", (0.0, 255.0, 1.0), 70.0),
            color("lineColor", "Line Color", "Color", Rgb8::new(0x41, 0xff, 0x1f)),
        ],
        EffectId::Threshold => vec![range(
            "level",
            "Threshold",
            "Threshold",
            (0.0, 255.0, 1.0),
            120.0,
        )],
        EffectId::Dithering => vec![range(
            "contrast",
            "Contrast",
            "Dithering",
            (40.0, 190.0, 1.0),
            120.0,
        )],
        EffectId::Halftone => vec![
            range("cell", "Cell Size", "Halftone", (3.0, 16.0, 1.0), 8.0),
            choice("shape", "Shape", "Halftone", SHAPES, "Circle"),
        ],
        EffectId::Blockify => vec![range(
            "block",
            "Block Size",
            "Blockify",
            (4.0, 36.0, 1.0),
            12.0,
        )],
        EffectId::PixelSort => vec![range(
            "threshold",
            "Sort Threshold",
            "Pixel Sort",
            (0.0, 255.0, 1.0),
            115.0,
        )],
        EffectId::Crosshatch => vec![range(
            "density",
            "Density",
            "Crosshatch",
            (4.0, 20.0, 1.0),
            9.0,
        )],
        EffectId::WaveLines => vec![
            range("amp", "Amplitude", "Wave Lines", (1.0, 35.0, 1.0), 10.0),
            range("freq", "Frequency", "Wave Lines", (0.002, 0.05, 0.001), 0.012),
        ],
        EffectId::NoiseField => vec![range(
            "amount",
            "Noise",
            "Noise Field",
            (0.0, 90.0, 1.0),
            26.0,
        )],
        EffectId::Voronoi => vec![range(
            "points",
            "Points",
            "Voronoi",
            (120.0, 2400.0, 20.0),
            800.0,
        )],
        EffectId::Contour => Vec::new(),
        EffectId::Vhs => vec![
            range("shift", "RGB Shift", "VHS", (0.0, 20.0, 1.0), 7.0),
            range("scan", "Scanline", "VHS", (0.0, 0.9, 0.02), 0.28),
            range("jitter", "Jitter", "VHS", (0.0, 20.0, 1.0), 5.0),
        ],
    }
}

fn build_catalog() -> Schema {
    let effects = EffectId::ALL
        .into_iter()
        .map(|id| EffectDescriptor {
            id,
            label: id.label(),
            controls: controls_for(id),
        })
        .collect();
    Schema { effects }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/catalog.rs"]
mod tests;
