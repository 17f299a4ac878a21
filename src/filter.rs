//! Presentation-side brightness
//!
//! Brightness never enters pattern math. Frames are published unscaled and
//! output drivers call [`apply_brightness`] (or do the equivalent in their
//! own pipeline) when painting.

use crate::color::{Rgb, RgbF};

/// Scale a color by a brightness factor
///
/// Factors above 1 brighten and saturate at full channel value; negative
/// or NaN factors give black.
#[allow(clippy::float_cmp)]
pub fn apply_brightness(color: Rgb, factor: f32) -> Rgb {
    if factor == 1.0 {
        return color;
    }
    RgbF::from(color).scale(f64::from(factor)).to_rgb()
}

/// Scale every color in place
#[allow(clippy::float_cmp)]
pub fn apply_brightness_in_place(colors: &mut [Rgb], factor: f32) {
    if factor == 1.0 {
        return;
    }
    for color in colors {
        *color = apply_brightness(*color, factor);
    }
}
