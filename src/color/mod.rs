mod hex;
mod hsl;
mod utils;

pub use hex::{HexString, hex_to_rgb, is_strict_hex, rgb_to_hex, to_hex};
pub use hsl::Hsl;
use smart_leds::RGB8;
pub use utils::{RgbF, lerp, rgb_from_u32};

pub type Rgb = RGB8;

/// Cell color used for "off" LEDs and every out-of-range lookup
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Full-on white
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
