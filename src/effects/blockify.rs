use crate::foundation::core::Size;
use crate::params::records::BlockifyParams;
use crate::render::raster::RasterBuffer;

/// Size of the downsampled intermediate for a `size` raster.
pub fn reduced_size(size: Size, p: &BlockifyParams) -> Size {
    let block = p.block.floor().max(2.0) as u32;
    Size::new(size.width.div_ceil(block), size.height.div_ceil(block))
}

/// Nearest-neighbor down into `scratch`, then nearest-neighbor back up into `out`.
pub fn apply(src: &RasterBuffer, scratch: &mut RasterBuffer, out: &mut RasterBuffer, p: &BlockifyParams) {
    let full = src.size();
    let small = reduced_size(full, p);
    scratch.resample_nearest_from(src, full, small);
    out.resample_nearest_from(scratch, small, full);
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blockify.rs"]
mod tests;
