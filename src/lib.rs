#![no_std]

pub mod channel;
pub mod color;
pub mod config;
pub mod device;
pub mod error;
pub mod filter;
pub mod frame_scheduler;
pub mod grid;
pub mod intent;
pub mod palette;
pub mod params;
pub mod pattern;
pub mod session;
pub mod suggestion;

pub use config::{ResolutionPolicy, SessionConfig};
pub use device::{DisplayDevice, NoDisplayDevice};
pub use error::{ConfigError, DeviceError, PaletteError, SuggestionError};
pub use frame_scheduler::{AnimationScheduler, AnimationState, FrameResult};
pub use grid::{GridEvaluator, GridFrame, GridSize};
pub use intent::{IntentChannel, IntentReceiver, IntentSender, SessionIntent};
pub use palette::Palette;
pub use params::SessionParams;
pub use pattern::{PATTERNS, PatternDescriptor, PatternId, PatternKind};
pub use session::SessionController;
pub use suggestion::PaletteSuggester;

pub use color::{Hsl, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract grid output
///
/// Implement this to paint frames: a window, a terminal, a physical LED
/// matrix. `brightness` is the session's presentation factor, frames are
/// never pre-scaled (see [`filter::apply_brightness`]).
pub trait OutputDriver {
    /// Publish a freshly evaluated frame
    fn write(&mut self, frame: &GridFrame<'_>, brightness: f32);
}

/// Route `log` output through `esp-println`
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
