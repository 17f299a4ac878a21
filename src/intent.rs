//! User and device events addressed to the session

use crate::channel::{Channel, Receiver, Sender};
use crate::color::Rgb;
use crate::palette::Palette;
use crate::pattern::PatternId;

/// Something the user or the display asked for
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    /// Switch to another pattern
    SelectPattern(PatternId),
    /// Change the time multiplier
    SetSpeed(f32),
    /// Change the presentation brightness factor
    SetBrightness(f32),
    /// Replace the whole palette
    SetPalette(Palette),
    /// Replace one palette entry
    SetColor { index: usize, color: Rgb },
    /// Pause or resume the animation
    SetAnimationEnabled(bool),
    /// Rotate the primary color (solid color mode only)
    CyclePrimaryColor,
    /// Enter or leave fullscreen
    ToggleFullscreen,
    /// The platform left fullscreen on its own (e.g. user pressed Esc)
    FullscreenExited,
}

/// Type alias for intent sender
pub type IntentSender<'a, const SIZE: usize> = Sender<'a, SessionIntent, SIZE>;

/// Type alias for intent receiver
pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, SessionIntent, SIZE>;

/// Type alias for the intent channel
pub type IntentChannel<const SIZE: usize> = Channel<SessionIntent, SIZE>;
