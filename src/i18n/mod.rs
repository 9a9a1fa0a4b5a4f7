//! Supported locales and locale-prefixed routing helpers.
//!
//! Every public URL carries its locale as the first path segment
//! (`/pl/about`). The rest of the crate works with the *logical* path
//! (`/about`) and a [`Locale`], and uses [`localized_path`] and
//! [`split_locale`] to move between the two forms.
//!
//! # Registry
//!
//! [`LOCALES`] is the ordered registry of supported locales. Its order is
//! the order in which locale pickers list their options.

pub mod messages;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

pub use messages::{Message, translate};

/// A supported UI locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Polish.
    Pl,
    /// German.
    De,
    /// French.
    Fr,
}

/// Display attributes of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
    /// Human-readable name, in the locale's own language.
    pub label: &'static str,
    /// Flag glyph shown next to the label.
    pub flag: &'static str,
}

/// Locale registry, in display order.
pub const LOCALES: [(Locale, LocaleInfo); 4] = [
    (
        Locale::En,
        LocaleInfo {
            label: "English",
            flag: "🇺🇸",
        },
    ),
    (
        Locale::Pl,
        LocaleInfo {
            label: "Polski",
            flag: "🇵🇱",
        },
    ),
    (
        Locale::De,
        LocaleInfo {
            label: "Deutsch",
            flag: "🇩🇪",
        },
    ),
    (
        Locale::Fr,
        LocaleInfo {
            label: "Français",
            flag: "🇫🇷",
        },
    ),
];

impl Locale {
    /// Iterate over all supported locales in registry order.
    pub fn all() -> impl Iterator<Item = Locale> {
        LOCALES.iter().map(|(locale, _)| *locale)
    }

    /// ISO 639-1 code used in URLs and the `lang` attribute.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pl => "pl",
            Self::De => "de",
            Self::Fr => "fr",
        }
    }

    /// Registry entry for this locale.
    #[must_use]
    pub fn info(self) -> &'static LocaleInfo {
        LOCALES
            .iter()
            .find(|(locale, _)| *locale == self)
            .map(|(_, info)| info)
            .unwrap_or(&LOCALES[0].1)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        self.info().label
    }

    #[must_use]
    pub fn flag(self) -> &'static str {
        self.info().flag
    }

    /// Supported locale for a language tag, matched on its language subtag.
    pub fn from_langid(langid: &LanguageIdentifier) -> Option<Locale> {
        langid.language.as_str().parse().ok()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a string is not a supported locale code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale `{0}`")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::all()
            .find(|locale| locale.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Split a public URL path into its locale prefix and logical path.
///
/// Returns `None` for the locale when the first segment is not a supported
/// locale; the logical path is then the input path unchanged.
///
/// ```rust
/// use starter_shell::i18n::{Locale, split_locale};
///
/// assert_eq!(split_locale("/pl/about"), (Some(Locale::Pl), "/about".to_string()));
/// assert_eq!(split_locale("/de"), (Some(Locale::De), "/".to_string()));
/// assert_eq!(split_locale("/about"), (None, "/about".to_string()));
/// ```
pub fn split_locale(path: &str) -> (Option<Locale>, String) {
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = match trimmed.find('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };

    match first.parse::<Locale>() {
        Ok(locale) => {
            let logical = if rest.is_empty() { "/" } else { rest };
            (Some(locale), logical.to_string())
        }
        Err(_) => {
            let logical = if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            };
            (None, logical)
        }
    }
}

/// Build the public URL path for a logical path under `locale`.
#[must_use]
pub fn localized_path(path: &str, locale: Locale) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        format!("/{locale}")
    } else {
        format!("/{locale}/{path}")
    }
}

/// Pick the best supported locale for an `Accept-Language` header value.
///
/// Entries are ranked by their `q` weight (default 1.0); each tag is parsed
/// as a [`LanguageIdentifier`] and matched on its language subtag (`pl-PL`
/// matches `pl`). Falls back to `default` when nothing matches.
pub fn negotiate(accept_language: Option<&str>, default: Locale) -> Locale {
    let Some(header) = accept_language else {
        return default;
    };

    let mut ranked: Vec<(f32, Locale)> = header
        .split(',')
        .filter_map(|entry| {
            let (tag, params) = entry.split_once(';').unwrap_or((entry, ""));
            let langid = tag.trim().parse::<LanguageIdentifier>().ok()?;
            let locale = Locale::from_langid(&langid)?;
            let weight = params
                .split(';')
                .find_map(|param| param.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (weight > 0.0).then_some((weight, locale))
        })
        .collect();

    // Stable sort keeps header order for equal weights.
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.first().map_or(default, |(_, locale)| *locale)
}
