use crate::foundation::core::Rgb8;
use crate::foundation::error::{RasterFxError, RasterFxResult};
use crate::params::store::ParamSet;
use crate::schema::EffectId;
use crate::schema::ramps::GlyphRamp;

/// Filled primitive used by dot-style effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Filled disc.
    Circle,
    /// Axis-aligned filled square.
    Square,
}

impl Shape {
    fn parse(s: &str) -> RasterFxResult<Self> {
        match s {
            "Circle" => Ok(Shape::Circle),
            "Square" => Ok(Shape::Square),
            _ => Err(RasterFxError::validation(format!("unknown shape '{s}'"))),
        }
    }
}

/// Glyph coloring for the mosaic effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphColorMode {
    /// Glyphs take the adjusted source color.
    Original,
    /// Glyphs are drawn in gray at the mapped value.
    Monochrome,
}

/// Direction of the falling stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Heads move toward larger y.
    Down,
    /// Heads move toward smaller y.
    Up,
}

/// Grid layout for the dots effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridLayout {
    /// Aligned rows.
    Square,
    /// Every odd row shifted by half a step.
    Offset,
}

/// Mosaic-Glyph parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct AsciiParams {
    pub scale: f64,
    pub spacing: f64,
    pub output_width: f64,
    pub ramp: GlyphRamp,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub hue_rotation: f64,
    pub sharpness: f64,
    pub gamma: f64,
    pub mode: GlyphColorMode,
    pub background_intensity: f64,
    pub invert: bool,
    pub brightness_map: f64,
}

/// Falling-Stream parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixParams {
    pub ramp: GlyphRamp,
    pub cell_size: f64,
    pub spacing: f64,
    pub speed: f64,
    pub trail_length: f64,
    pub direction: Direction,
    pub glow: f64,
    pub bg_opacity: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub threshold: f64,
    pub rain_color: Rgb8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotsParams {
    pub shape: Shape,
    pub grid: GridLayout,
    pub size: f64,
    pub spacing: f64,
    pub invert: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeParams {
    pub strength: f64,
    pub threshold: f64,
    pub line_color: Rgb8,
}

impl EdgeParams {
    /// Fixed parameters used by the contour effect.
    pub const CONTOUR: EdgeParams = EdgeParams {
        strength: 1.2,
        threshold: 70.0,
        line_color: Rgb8::new(0x7d, 0xff, 0x5d),
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdParams {
    pub level: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DitherParams {
    pub contrast: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HalftoneParams {
    pub cell: f64,
    pub shape: Shape,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockifyParams {
    pub block: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelSortParams {
    pub threshold: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrosshatchParams {
    pub density: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveParams {
    pub amp: f64,
    pub freq: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    pub amount: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiParams {
    pub points: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VhsParams {
    pub shift: f64,
    pub scan: f64,
    pub jitter: f64,
}

/// An effect together with its decoded parameter record.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Ascii(AsciiParams),
    Dithering(DitherParams),
    Halftone(HalftoneParams),
    Matrix(MatrixParams),
    Dots(DotsParams),
    Contour,
    PixelSort(PixelSortParams),
    Blockify(BlockifyParams),
    Threshold(ThresholdParams),
    Edge(EdgeParams),
    Crosshatch(CrosshatchParams),
    WaveLines(WaveParams),
    NoiseField(NoiseParams),
    Voronoi(VoronoiParams),
    Vhs(VhsParams),
}

impl Effect {
    /// Identifier of this effect.
    pub fn id(&self) -> EffectId {
        match self {
            Effect::Ascii(_) => EffectId::Ascii,
            Effect::Dithering(_) => EffectId::Dithering,
            Effect::Halftone(_) => EffectId::Halftone,
            Effect::Matrix(_) => EffectId::Matrix,
            Effect::Dots(_) => EffectId::Dots,
            Effect::Contour => EffectId::Contour,
            Effect::PixelSort(_) => EffectId::PixelSort,
            Effect::Blockify(_) => EffectId::Blockify,
            Effect::Threshold(_) => EffectId::Threshold,
            Effect::Edge(_) => EffectId::Edge,
            Effect::Crosshatch(_) => EffectId::Crosshatch,
            Effect::WaveLines(_) => EffectId::WaveLines,
            Effect::NoiseField(_) => EffectId::NoiseField,
            Effect::Voronoi(_) => EffectId::Voronoi,
            Effect::Vhs(_) => EffectId::Vhs,
        }
    }

    /// Decode the typed record for `id` from a parameter set.
    pub fn decode(id: EffectId, p: &ParamSet) -> RasterFxResult<Effect> {
        Ok(match id {
            EffectId::Ascii => Effect::Ascii(AsciiParams {
                scale: p.number("scale")?,
                spacing: p.number("spacing")?,
                output_width: p.number("outputWidth")?,
                ramp: GlyphRamp::from_name(p.choice("characterSet")?)?,
                brightness: p.number("brightness")?,
                contrast: p.number("contrast")?,
                saturation: p.number("saturation")?,
                hue_rotation: p.number("hueRotation")?,
                sharpness: p.number("sharpness")?,
                gamma: p.number("gamma")?,
                mode: match p.choice("mode")? {
                    "Monochrome" => GlyphColorMode::Monochrome,
                    "Original" => GlyphColorMode::Original,
                    other => {
                        return Err(RasterFxError::validation(format!(
                            "unknown glyph color mode '{other}'"
                        )));
                    }
                },
                background_intensity: p.number("backgroundIntensity")?,
                invert: p.flag("invert")?,
                brightness_map: p.number("brightnessMap")?,
            }),
            EffectId::Matrix => Effect::Matrix(MatrixParams {
                ramp: GlyphRamp::from_name(p.choice("characterSet")?)?,
                cell_size: p.number("cellSize")?,
                spacing: p.number("spacing")?,
                speed: p.number("speed")?,
                trail_length: p.number("trailLength")?,
                direction: match p.choice("direction")? {
                    "Up" => Direction::Up,
                    "Down" => Direction::Down,
                    other => {
                        return Err(RasterFxError::validation(format!(
                            "unknown direction '{other}'"
                        )));
                    }
                },
                glow: p.number("glow")?,
                bg_opacity: p.number("bgOpacity")?,
                brightness: p.number("brightness")?,
                contrast: p.number("contrast")?,
                threshold: p.number("threshold")?,
                rain_color: p.color("rainColor")?,
            }),
            EffectId::Dots => Effect::Dots(DotsParams {
                shape: Shape::parse(p.choice("shape")?)?,
                grid: match p.choice("gridType")? {
                    "Offset Grid" => GridLayout::Offset,
                    "Square Grid" => GridLayout::Square,
                    other => {
                        return Err(RasterFxError::validation(format!(
                            "unknown grid type '{other}'"
                        )));
                    }
                },
                size: p.number("size")?,
                spacing: p.number("spacing")?,
                invert: p.flag("invert")?,
            }),
            EffectId::Edge => Effect::Edge(EdgeParams {
                strength: p.number("strength")?,
                threshold: p.number("threshold")?,
                line_color: p.color("lineColor")?,
            }),
            EffectId::Contour => Effect::Contour,
            EffectId::Threshold => Effect::Threshold(ThresholdParams {
                level: p.number("level")?,
            }),
            EffectId::Dithering => Effect::Dithering(DitherParams {
                contrast: p.number("contrast")?,
            }),
            EffectId::Halftone => Effect::Halftone(HalftoneParams {
                cell: p.number("cell")?,
                shape: Shape::parse(p.choice("shape")?)?,
            }),
            EffectId::Blockify => Effect::Blockify(BlockifyParams {
                block: p.number("block")?,
            }),
            EffectId::PixelSort => Effect::PixelSort(PixelSortParams {
                threshold: p.number("threshold")?,
            }),
            EffectId::Crosshatch => Effect::Crosshatch(CrosshatchParams {
                density: p.number("density")?,
            }),
            EffectId::WaveLines => Effect::WaveLines(WaveParams {
                amp: p.number("amp")?,
                freq: p.number("freq")?,
            }),
            EffectId::NoiseField => Effect::NoiseField(NoiseParams {
                amount: p.number("amount")?,
            }),
            EffectId::Voronoi => Effect::Voronoi(VoronoiParams {
                points: p.number("points")?,
            }),
            EffectId::Vhs => Effect::Vhs(VhsParams {
                shift: p.number("shift")?,
                scan: p.number("scan")?,
                jitter: p.number("jitter")?,
            }),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/records.rs"]
mod tests;
