//! Hex color codec
//!
//! Parsing is lenient (anything malformed decodes to black) so a single bad
//! palette entry never breaks a frame. Encoding always yields `#rrggbb`.

use core::fmt::Write;

use heapless::String;

use crate::color::{BLACK, Rgb, RgbF};

/// `#rrggbb`
pub type HexString = String<7>;

/// Parse a 6-digit hex color, with or without the leading `#`.
///
/// Case-insensitive. Malformed input yields black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return BLACK;
    }

    let channel = |range: core::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };

    Rgb {
        r: channel(0..2),
        g: channel(2..4),
        b: channel(4..6),
    }
}

/// Check for the strict `#RRGGBB` form accepted from external collaborators
pub fn is_strict_hex(hex: &str) -> bool {
    hex.len() == 7
        && hex.starts_with('#')
        && hex.bytes().skip(1).all(|b| b.is_ascii_hexdigit())
}

/// Encode fractional channels as a hex color.
///
/// Channels are rounded to the nearest integer and clamped to 0-255,
/// NaN encodes as 0.
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> HexString {
    to_hex(RgbF::new(r, g, b).to_rgb())
}

/// Encode a color as `#rrggbb`
pub fn to_hex(color: Rgb) -> HexString {
    let mut out = HexString::new();
    // 7 bytes always fit
    let _ = write!(out, "#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    out
}
