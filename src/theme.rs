use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// The page-level presentation attribute. Persisted in the config file
/// as `"light"` / `"dark"`; everything else in the UI derives its colors
/// from the palette for the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeMode::Light => Palette {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                header_bg: Color::Gray,
                success: Color::Green,
                error: Color::Red,
            },
            ThemeMode::Dark => Palette {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                header_bg: Color::DarkGray,
                success: Color::LightGreen,
                error: Color::LightRed,
            },
        }
    }
}

/// Colors every widget queries so light/dark stay consistent.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub header_bg: Color,
    pub success: Color,
    pub error: Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_round_trips() {
        let start = ThemeMode::Light;
        assert_eq!(start.toggled().toggled(), start);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }

    #[test]
    fn serializes_as_lowercase_strings() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let parsed: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }

    #[test]
    fn defaults_to_light() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }
}
