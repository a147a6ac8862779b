//! Light/dark preference and the colours for each.

use ratatui::style::Color;

use crate::error::Result;
use crate::jar::{default_ttl, KeyValueStore};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value stored in the jar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn load(jar: &impl KeyValueStore) -> Result<Self> {
        Ok(jar
            .get(THEME_KEY)?
            .map(|name| Theme::from_name(&name))
            .unwrap_or_default())
    }

    pub fn save(self, jar: &mut impl KeyValueStore) -> Result<()> {
        tracing::debug!(theme = self.as_str(), "saving theme");
        jar.set(THEME_KEY, self.as_str(), default_ttl())
    }

    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => light_colors(),
            Theme::Dark => dark_colors(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub bg: Color,
    /// Selected row background
    pub bg_secondary: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,
    pub tab_active_fg: Color,
    pub tab_active_bg: Color,
    /// Completed task text
    pub done: Color,
    pub error: Color,
}

pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),
        bg_secondary: Color::Rgb(48, 48, 48),
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        highlight: Color::Rgb(0, 255, 136),
        tab_active_fg: Color::Black,
        tab_active_bg: Color::Rgb(0, 255, 136),
        done: Color::Rgb(110, 110, 110),
        error: Color::Rgb(255, 85, 85),
    }
}

pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        highlight: Color::Rgb(0, 128, 68),
        tab_active_fg: Color::White,
        tab_active_bg: Color::Rgb(0, 128, 68),
        done: Color::Rgb(150, 150, 150),
        error: Color::Rgb(200, 50, 50),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jar::MemoryJar;

    #[test]
    fn missing_preference_is_light() {
        let jar = MemoryJar::new();
        assert_eq!(Theme::load(&jar).unwrap(), Theme::Light);
    }

    #[test]
    fn unknown_value_is_light() {
        assert_eq!(Theme::from_name("solarized"), Theme::Light);
    }

    #[test]
    fn preference_round_trips_through_jar() {
        let mut jar = MemoryJar::new();
        Theme::Light.toggled().save(&mut jar).unwrap();
        assert_eq!(jar.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(Theme::load(&jar).unwrap(), Theme::Dark);
    }
}
