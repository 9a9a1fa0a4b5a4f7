//! Light/dark theme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::i18n::Message;

/// Name of the cookie holding the theme.
pub const THEME_COOKIE: &str = "theme";

/// One of the two supported color themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Value used for the `<html>` class and the cookie.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Catalog key for the theme's display name.
    #[must_use]
    pub fn message(self) -> Message {
        match self {
            Self::Light => Message::Light,
            Self::Dark => Message::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme `{0}`")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Theme accessor. Persistence is up to the implementor.
pub trait ThemeStore {
    fn theme(&self) -> Theme;

    fn set_theme(&mut self, theme: Theme);
}

/// Flip the stored theme and return the new value.
pub fn toggle_theme(store: &mut impl ThemeStore) -> Theme {
    let next = store.theme().toggled();
    store.set_theme(next);
    tracing::debug!(name: "theme.toggled", theme = %next, "Theme toggled");
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Store(Theme);

    impl ThemeStore for Store {
        fn theme(&self) -> Theme {
            self.0
        }

        fn set_theme(&mut self, theme: Theme) {
            self.0 = theme;
        }
    }

    #[test]
    fn test_toggle_flips_between_two_values() {
        for start in [Theme::Light, Theme::Dark] {
            let mut store = Store(start);
            let once = toggle_theme(&mut store);
            assert_ne!(once, start);
            assert_eq!(store.0, once);
            toggle_theme(&mut store);
            assert_eq!(store.0, start);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("system".parse::<Theme>().is_err());
    }
}
