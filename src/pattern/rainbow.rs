use crate::{
    color::{Hsl, Rgb},
    grid::GridSize,
};

const SATURATION: f64 = 100.0;
const LIGHTNESS: f64 = 70.0;

/// Hue wave travelling diagonally across the grid
///
/// Ignores the palette.
pub fn rainbow_wave_hsl(x: u16, y: u16, t: f64, size: GridSize) -> Hsl {
    let cols = f64::from(size.cols) / 4.0;
    let rows = f64::from(size.rows) / 4.0;
    let wave = libm::sin(f64::from(x) / cols + f64::from(y) / rows + t);
    let hue = (wave * 180.0 + 180.0) % 360.0;
    Hsl::new(hue, SATURATION, LIGHTNESS)
}

pub fn rainbow_wave(x: u16, y: u16, t: f64, size: GridSize, _palette: &[Rgb]) -> Rgb {
    rainbow_wave_hsl(x, y, t, size).to_rgb()
}
