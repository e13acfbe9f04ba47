//! Pixel-level helpers shared by every effect.

/// Clamp `v` into `[lo, hi]`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

/// Clamp into the 8-bit channel range.
pub fn clamp_channel(v: f64) -> f64 {
    clamp(v, 0.0, 255.0)
}

/// Perceptual brightness (Rec. 709 weights) of an RGB triple, in `[0, 255]`.
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// [`luma`] of the first three bytes of an RGBA pixel.
pub fn luma_px(px: &[u8]) -> f64 {
    luma(f64::from(px[0]), f64::from(px[1]), f64::from(px[2]))
}

/// Shift `value` by `brightness_offset`, then remap contrast around 128.
///
/// `contrast_percent` is 100 for identity; the result is clamped to `[0, 255]`.
pub fn brightness_contrast(value: f64, brightness_offset: f64, contrast_percent: f64) -> f64 {
    let shifted = value + brightness_offset;
    let c = (contrast_percent - 100.0) / 100.0;
    let factor = (259.0 * (c * 255.0 + 255.0)) / (255.0 * (259.0 - c * 255.0));
    clamp_channel(factor * (shifted - 128.0) + 128.0)
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Deterministic linear-congruential generator producing values in `[0, 1)`.
///
/// `state = (1664525 * state + 1013904223) mod 2^32`, output `state / 2^32`. The same seed
/// always yields the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator positioned at `seed`.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance and return the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        f64::from(self.state) / 4_294_967_296.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
