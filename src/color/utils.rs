use crate::color::Rgb;

/// RGB color with unclamped fractional channels
///
/// Intermediate results of interpolation and pulse math live here; values
/// outside 0-255 are legal until [`RgbF::to_rgb`] is called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbF {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl RgbF {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Round, clamp to 0-255 and convert. NaN becomes 0.
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: channel_to_u8(self.r),
            g: channel_to_u8(self.g),
            b: channel_to_u8(self.b),
        }
    }
}

impl From<Rgb> for RgbF {
    fn from(color: Rgb) -> Self {
        Self {
            r: f64::from(color.r),
            g: f64::from(color.g),
            b: f64::from(color.b),
        }
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    libm::round(value).clamp(0.0, 255.0) as u8
}

/// Per-channel linear interpolation
///
/// `factor` is not clamped: values outside 0..=1 extrapolate past the
/// endpoints.
pub fn lerp(a: Rgb, b: Rgb, factor: f64) -> RgbF {
    let a = RgbF::from(a);
    let b = RgbF::from(b);
    RgbF {
        r: a.r + factor * (b.r - a.r),
        g: a.g + factor * (b.g - a.g),
        b: a.b + factor * (b.b - a.b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}
