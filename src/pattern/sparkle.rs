use rand::{Rng, RngCore};

use super::cell_hash;
use crate::{
    color::{BLACK, Rgb},
    grid::GridSize,
};

/// Hash threshold above which a cell lights up
const TRIGGER: f64 = 0.98;

/// Whether the cell is lit in the half-second bucket containing `t`
///
/// Fully deterministic.
pub fn sparkle_triggered(x: u16, y: u16, t: f64) -> bool {
    cell_hash(x, y, libm::floor(t * 2.0)) > TRIGGER
}

/// Sparse flashes of random palette colors on black
///
/// Which cells flash is a pure function of the cell and time bucket; the
/// color of a flashing cell is drawn from `rng` on every call.
pub fn sparkle<R: RngCore>(
    x: u16,
    y: u16,
    t: f64,
    _size: GridSize,
    palette: &[Rgb],
    rng: &mut R,
) -> Rgb {
    if palette.is_empty() || !sparkle_triggered(x, y, t) {
        return BLACK;
    }
    palette[rng.random_range(0..palette.len())]
}
