use core::fmt;

use crate::color::{Rgb, RgbF};

/// HSL color as used by hue-based patterns
///
/// Hue is in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Convert to RGB using the CSS HSL model
    pub fn to_rgb(self) -> Rgb {
        let s = (self.saturation / 100.0).clamp(0.0, 1.0);
        let l = (self.lightness / 100.0).clamp(0.0, 1.0);
        let hue = self.hue % 360.0;
        let hue = if hue < 0.0 { hue + 360.0 } else { hue };

        let chroma = (1.0 - libm::fabs(2.0 * l - 1.0)) * s;
        let sector = hue / 60.0;
        let x = chroma * (1.0 - libm::fabs(sector % 2.0 - 1.0));
        let m = l - chroma / 2.0;

        let (r, g, b) = match sector {
            h if h < 1.0 => (chroma, x, 0.0),
            h if h < 2.0 => (x, chroma, 0.0),
            h if h < 3.0 => (0.0, chroma, x),
            h if h < 4.0 => (0.0, x, chroma),
            h if h < 5.0 => (x, 0.0, chroma),
            // NaN hue lands here too
            _ => (chroma, 0.0, x),
        };

        RgbF::new((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0).to_rgb()
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}
