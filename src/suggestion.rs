//! Palette suggestions from an external service
//!
//! The service takes a free-text theme and answers with six colors. Only
//! the validation lives here; transport is up to the host.

use crate::error::SuggestionError;
use crate::palette::Palette;

/// Shortest theme worth sending
pub const MIN_THEME_LEN: usize = 3;

/// Number of colors in every suggestion
pub const SUGGESTED_COLORS: usize = 6;

/// Source of suggested palettes
pub trait PaletteSuggester {
    /// Suggest a palette for an already validated theme
    fn suggest(&mut self, theme: &str) -> Result<Palette, SuggestionError>;
}

/// Trim a theme and check its length
pub fn validate_theme(theme: &str) -> Result<&str, SuggestionError> {
    let theme = theme.trim();
    if theme.chars().count() < MIN_THEME_LEN {
        return Err(SuggestionError::ThemeTooShort);
    }
    Ok(theme)
}

/// Turn a raw service answer into a palette
///
/// Every entry must be a strict `#RRGGBB` string and there must be exactly
/// [`SUGGESTED_COLORS`] of them.
pub fn parse_suggestion<S: AsRef<str>>(colors: &[S]) -> Result<Palette, SuggestionError> {
    match colors.len() {
        0 => return Err(SuggestionError::NoColors),
        SUGGESTED_COLORS => {}
        count => return Err(SuggestionError::WrongColorCount(count)),
    }
    Ok(Palette::from_hex(colors)?)
}
