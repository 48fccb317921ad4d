use crate::foundation::core::Rgb;

/// A color in the BT.601 luminance/chrominance space.
///
/// `y` is normally in `[0, 1)` and `cb`/`cr` center on `0.5`, but no clamping is applied:
/// saturated inputs may push chroma slightly outside `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct YCbCr {
    /// Luminance.
    pub y: f64,
    /// Blue-difference chroma, offset by `0.5`.
    pub cb: f64,
    /// Red-difference chroma, offset by `0.5`.
    pub cr: f64,
}

impl YCbCr {
    /// Build a value from its three components.
    pub const fn new(y: f64, cb: f64, cr: f64) -> Self {
        Self { y, cb, cr }
    }
}

/// Convert 8-bit RGB channels to YCbCr.
///
/// Channels are normalized by dividing by 256 (not 255); [`ycbcr_to_rgb`] scales back by 256.
pub fn rgb_to_ycbcr(r: u8, g: u8, b: u8) -> YCbCr {
    let r = f64::from(r) / 256.0;
    let g = f64::from(g) / 256.0;
    let b = f64::from(b) / 256.0;

    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let cb = (b - y) / 1.772 + 0.5;
    let cr = (r - y) / 1.402 + 0.5;

    YCbCr { y, cb, cr }
}

/// Convert YCbCr back to signed RGB channel values.
///
/// Each channel is scaled by 256 and truncated toward zero. Results are deliberately left
/// unclamped and can fall outside `0..=255`; use [`Rgb::clamped`] to obtain a display color.
pub fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64) -> [i32; 3] {
    let r = y + 701.0 / 500.0 * (cr - 0.5);
    let g = y - 25251.0 / 73375.0 * (cb - 0.5) - 209599.0 / 293500.0 * (cr - 0.5);
    let b = y + 443.0 / 250.0 * (cb - 0.5);

    // `as` truncates toward zero.
    [(r * 256.0) as i32, (g * 256.0) as i32, (b * 256.0) as i32]
}

/// Gray level of a color: the luminance scaled by 256 and truncated.
pub fn luma(c: Rgb) -> u8 {
    let y = rgb_to_ycbcr(c.r, c.g, c.b).y;
    // y < 1 for every 8-bit input, so the product stays below 256.
    (y * 256.0) as u8
}

/// Display color for a gray level, computed through the inverse transform with neutral chroma.
pub fn gray_to_rgb(gray: u8) -> Rgb {
    let [r, g, b] = ycbcr_to_rgb(f64::from(gray) / 256.0, 0.5, 0.5);
    Rgb::clamped(r, g, b)
}

#[cfg(test)]
#[path = "../../tests/unit/color/ycbcr.rs"]
mod tests;
