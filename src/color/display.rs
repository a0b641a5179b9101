//! Channel selection and text rendering of resolved colors.

use super::Rgba;
use super::role::ParseError;
use std::str::FromStr;

/// Which channels of a resolved color end up in the measure text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    /// Red, green, blue, plus alpha when the source has a non-zero one.
    #[default]
    All,
    Red,
    Green,
    Blue,
    Alpha,
    /// Red, green, blue without alpha.
    Rgb,
}

const DISPLAY_NAMES: &[(&str, DisplayType)] = &[
    ("ALL", DisplayType::All),
    ("RED", DisplayType::Red),
    ("GREEN", DisplayType::Green),
    ("BLUE", DisplayType::Blue),
    ("ALPHA", DisplayType::Alpha),
    ("RGB", DisplayType::Rgb),
];

impl DisplayType {
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        DISPLAY_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, display)| *display)
    }

    pub fn name(self) -> &'static str {
        DISPLAY_NAMES
            .iter()
            .find(|(_, display)| *display == self)
            .map(|(name, _)| *name)
            .unwrap_or("ALL")
    }
}

impl FromStr for DisplayType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ParseError::UnknownDisplayType(s.to_string()))
    }
}

/// Formats one channel as two uppercase hex digits or as a decimal number.
pub fn channel_to_string(value: u8, hex: bool) -> String {
    if hex {
        format!("{value:02X}")
    } else {
        value.to_string()
    }
}

/// Renders the channels selected by `display`.
///
/// Returns `None` when the selection has nothing to show, which only happens
/// for [`DisplayType::Alpha`] on a color whose alpha is absent or zero. A zero
/// alpha is also left out of [`DisplayType::All`].
pub fn render(color: Rgba, display: DisplayType, hex: bool) -> Option<String> {
    let separator = if hex { "" } else { "," };
    let visible_alpha = color.a.filter(|a| *a > 0);

    let text = match display {
        DisplayType::Red => channel_to_string(color.r, hex),
        DisplayType::Green => channel_to_string(color.g, hex),
        DisplayType::Blue => channel_to_string(color.b, hex),
        DisplayType::Alpha => channel_to_string(visible_alpha?, hex),
        DisplayType::Rgb | DisplayType::All => {
            let mut channels = vec![color.r, color.g, color.b];
            if display == DisplayType::All {
                channels.extend(visible_alpha);
            }
            channels
                .into_iter()
                .map(|channel| channel_to_string(channel, hex))
                .collect::<Vec<_>>()
                .join(separator)
        }
    };

    Some(text)
}
