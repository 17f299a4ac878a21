use crate::{
    color::{BLACK, Rgb, lerp},
    grid::GridSize,
};

/// Three interfering sine waves mapped onto the palette
#[allow(clippy::cast_precision_loss)]
pub fn plasma(x: u16, y: u16, t: f64, size: GridSize, palette: &[Rgb]) -> Rgb {
    let (x, y) = (f64::from(x), f64::from(y));
    let cols = f64::from(size.cols);
    let rows = f64::from(size.rows);

    let v1 = libm::sin(x / (cols / 8.0) + t);
    let v2 = libm::sin(y / (rows / 8.0) + t);
    let v3 = libm::sin((x + y) / ((cols + rows) / 16.0) + t);
    let v = (v1 + v2 + v3) / 3.0;

    // An empty palette gives a negative span and falls through to black
    let span = palette.len() as f64 - 1.0;
    let position = (v + 1.0) / 2.0 * span;

    let (Some(from), Some(to)) = (
        stop(palette, libm::floor(position)),
        stop(palette, libm::ceil(position)),
    ) else {
        return BLACK;
    };

    lerp(from, to, position % 1.0).to_rgb()
}

/// Palette entry at a fractional index, `None` when outside the palette
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(super) fn stop(palette: &[Rgb], index: f64) -> Option<Rgb> {
    if index.is_nan() || index < 0.0 {
        return None;
    }
    palette.get(index as usize).copied()
}
