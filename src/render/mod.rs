pub(crate) mod canvas;
pub(crate) mod fonts;
pub(crate) mod glyph;
pub(crate) mod raster;
