//! WCAG contrast mathematics.
//!
//! Pure functions from resolved colors to a contrast ratio. Inputs are
//! assumed opaque; translucent colors must be composited against their
//! backdrop before calling in.

use crate::css::Color;

/// Convert an 8-bit sRGB channel to linear light.
///
/// Uses the piecewise sRGB transfer function from the WCAG relative
/// luminance definition.
fn linearize(channel: u8) -> f64 {
    let v = channel as f64 / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance of a color (0.0 for black, 1.0 for white).
pub fn relative_luminance(color: Color) -> f64 {
    0.2126 * linearize(color.r) + 0.7152 * linearize(color.g) + 0.0722 * linearize(color.b)
}

/// WCAG contrast ratio between two colors.
///
/// Symmetric in its arguments and always >= 1.0; a color against itself
/// is exactly 1.0.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}
