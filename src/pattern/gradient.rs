use super::plasma::stop;
use crate::{
    color::{BLACK, Rgb, lerp},
    grid::GridSize,
};

/// Horizontal palette gradient swaying with time
///
/// Progress wraps with a truncating remainder, so the half-period where
/// the sway is negative maps to no stop and renders black.
#[allow(clippy::cast_precision_loss)]
pub fn gradient(x: u16, _y: u16, t: f64, size: GridSize, palette: &[Rgb]) -> Rgb {
    let across = if size.cols > 1 {
        f64::from(x) / (f64::from(size.cols) - 1.0)
    } else {
        0.0
    };
    let progress = (across + libm::sin(t / 2.0)) % 1.0;

    let stops = palette.len() as f64 - 1.0;
    let start = libm::floor(progress * stops);
    let end = (start + 1.0).min(stops);
    let local = progress * stops - start;

    let (Some(from), Some(to)) = (stop(palette, start), stop(palette, end)) else {
        return BLACK;
    };

    lerp(from, to, local).to_rgb()
}
