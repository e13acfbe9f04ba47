use rand::Rng as _;

use crate::foundation::math::clamp_channel;
use crate::params::records::NoiseParams;
use crate::render::raster::RasterBuffer;

/// Adds one uniform offset in `[-amount, amount)` to all three channels of each pixel.
pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &NoiseParams) {
    let mut rng = rand::rng();
    for (d, s) in out
        .data_mut()
        .chunks_exact_mut(4)
        .zip(src.data().chunks_exact(4))
    {
        let n = (rng.random::<f64>() - 0.5) * p.amount * 2.0;
        for c in 0..3 {
            d[c] = clamp_channel(f64::from(s[c]) + n).round() as u8;
        }
        d[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/noise.rs"]
mod tests;
