//! Festive string-light patterns
//!
//! Both treat the grid as one long strand indexed row by row.

use super::cell_hash;
use crate::{
    color::{BLACK, Rgb, WHITE},
    grid::GridSize,
};

/// Extra "off" slots appended to every blink cycle
const OFF_SLOTS: f64 = 5.0;

const TWINKLE_WHITE: f64 = 0.8;
const TWINKLE_OFF: f64 = 0.6;

#[inline]
fn strand_index(x: u16, y: u16, size: GridSize) -> f64 {
    f64::from(y) * f64::from(size.cols) + f64::from(x)
}

/// Chasing blink through the palette
///
/// Each bulb is lit for `len` out of every `len + 5` phase steps and shows
/// the palette entry its index has reached.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn blink_random(x: u16, y: u16, t: f64, size: GridSize, palette: &[Rgb]) -> Rgb {
    if palette.is_empty() {
        return BLACK;
    }
    let len = palette.len() as f64;
    let index = strand_index(x, y, size);
    let phase = t * 2.0;

    if (phase + index) % (len + OFF_SLOTS) >= len {
        return BLACK;
    }

    let mut slot = (index + libm::floor(phase)) % len;
    if slot < 0.0 {
        slot += len;
    }
    if !slot.is_finite() {
        return BLACK;
    }
    palette.get(slot as usize).copied().unwrap_or(BLACK)
}

/// Bulbs in palette order, occasionally flashing white or dropping out
pub fn twinkle(x: u16, y: u16, t: f64, size: GridSize, palette: &[Rgb]) -> Rgb {
    let Some(len) = core::num::NonZeroUsize::new(palette.len()) else {
        return BLACK;
    };
    let index = usize::from(y) * usize::from(size.cols) + usize::from(x);
    let base = palette[index % len.get()];

    let seed = cell_hash(x, y, libm::floor(t * 4.0));
    if seed > TWINKLE_WHITE {
        WHITE
    } else if seed > TWINKLE_OFF {
        BLACK
    } else {
        base
    }
}
