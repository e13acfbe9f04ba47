use crate::params::records::WaveParams;
use crate::render::raster::RasterBuffer;

/// Horizontal displacement of row `y` at clock `time` (milliseconds).
pub fn row_shift(y: u32, time: f64, p: &WaveParams) -> f64 {
    (f64::from(y) * p.freq + time * 0.002).sin() * p.amp
}

pub fn apply(src: &RasterBuffer, out: &mut RasterBuffer, p: &WaveParams, time: f64) {
    let width = i64::from(src.width());
    for y in 0..src.height() {
        let shift = row_shift(y, time, p);
        for x in 0..src.width() {
            let sx = ((f64::from(x) + shift).floor() as i64).clamp(0, width - 1);
            let [r, g, b, _] = src.pixel(sx as u32, y);
            out.put(x, y, [r, g, b, 255]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/wave.rs"]
mod tests;
