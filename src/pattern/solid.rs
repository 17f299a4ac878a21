use crate::{
    color::{BLACK, Rgb, RgbF},
    grid::GridSize,
};

/// Lowest brightness of the pulse
const PULSE_FLOOR: f64 = 0.8;
/// Pulse amplitude on top of the floor
const PULSE_DEPTH: f64 = 0.2;

/// Primary palette color breathing between 80% and 100% brightness
pub fn solid_color(_x: u16, _y: u16, t: f64, _size: GridSize, palette: &[Rgb]) -> Rgb {
    let base = palette.first().copied().unwrap_or(BLACK);
    let pulse = (libm::sin(t * 2.0) + 1.0) / 2.0;
    RgbF::from(base)
        .scale(PULSE_FLOOR + pulse * PULSE_DEPTH)
        .to_rgb()
}
