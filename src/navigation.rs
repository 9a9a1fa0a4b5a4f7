//! Locale-aware navigation.
//!
//! Components never touch the URL directly. They go through a [`Navigator`],
//! which knows the current [`Route`] and can replace it with the same page
//! under another locale. A locale switch is wrapped in a [`Transition`] so a
//! component issues at most one switch at a time.

use crate::i18n::{self, Locale};

/// A logical location: locale plus a path without the locale prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub locale: Locale,
    pub path: String,
}

impl Route {
    /// Build a route, validating the logical path.
    pub fn new(locale: Locale, path: impl Into<String>) -> Result<Self, NavigationError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(NavigationError::RelativePath(path));
        }
        if let (Some(prefix), _) = i18n::split_locale(&path) {
            return Err(NavigationError::LocalePrefixed {
                path,
                locale: prefix,
            });
        }
        Ok(Self { locale, path })
    }

    /// Parse a public URL path such as `/pl/about`.
    pub fn parse(url_path: &str) -> Result<Self, NavigationError> {
        match i18n::split_locale(url_path) {
            (Some(locale), path) => Ok(Self { locale, path }),
            (None, _) => Err(NavigationError::MissingLocale(url_path.to_string())),
        }
    }

    /// Public URL path of this route.
    #[must_use]
    pub fn href(&self) -> String {
        i18n::localized_path(&self.path, self.locale)
    }
}

/// A navigation issued through a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub from: Route,
    pub to: Route,
}

impl Navigation {
    /// Whether this navigation only changes the locale.
    #[must_use]
    pub fn is_locale_switch(&self) -> bool {
        self.from.path == self.to.path && self.from.locale != self.to.locale
    }
}

/// Errors raised by a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("path `{0}` is not absolute")]
    RelativePath(String),

    #[error("path `{path}` already carries the `{locale}` locale prefix")]
    LocalePrefixed { path: String, locale: Locale },

    #[error("path `{0}` has no supported locale prefix")]
    MissingLocale(String),
}

/// Routing capability consumed by the UI components.
pub trait Navigator {
    /// Current logical path, without the locale prefix.
    fn pathname(&self) -> &str;

    /// Current locale.
    fn locale(&self) -> Locale;

    /// Navigate to `path` under `locale`, replacing the current history entry.
    fn replace(&mut self, path: &str, locale: Locale) -> Result<Navigation, NavigationError>;
}

/// Single-flight guard around a deprioritized navigation.
///
/// While a navigation is in flight, [`Transition::start`] refuses to run
/// another one. The host clears the flag with [`Transition::complete`] once
/// the new route has rendered.
#[derive(Debug, Default)]
pub struct Transition {
    in_flight: Option<Navigation>,
}

impl Transition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a navigation is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The in-flight navigation, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<&Navigation> {
        self.in_flight.as_ref()
    }

    /// Run `navigate` unless a navigation is already in flight.
    ///
    /// Returns `Ok(None)` without calling `navigate` while pending. Errors
    /// from `navigate` are returned as-is and leave the guard idle.
    pub fn start<F>(&mut self, navigate: F) -> Result<Option<Navigation>, NavigationError>
    where
        F: FnOnce() -> Result<Navigation, NavigationError>,
    {
        if self.is_pending() {
            return Ok(None);
        }

        let navigation = navigate()?;
        self.in_flight = Some(navigation.clone());
        Ok(Some(navigation))
    }

    /// Mark the in-flight navigation as rendered.
    pub fn complete(&mut self) -> Option<Navigation> {
        self.in_flight.take()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingHost;
    use super::*;

    #[test]
    fn test_route_validation() {
        assert!(Route::new(Locale::En, "/about").is_ok());
        assert_eq!(
            Route::new(Locale::En, "about"),
            Err(NavigationError::RelativePath("about".to_string()))
        );
        assert!(matches!(
            Route::new(Locale::En, "/pl/about"),
            Err(NavigationError::LocalePrefixed { locale: Locale::Pl, .. })
        ));
    }

    #[test]
    fn test_route_parse_and_href() {
        let route = Route::parse("/de/docs").unwrap();
        assert_eq!(route.locale, Locale::De);
        assert_eq!(route.path, "/docs");
        assert_eq!(route.href(), "/de/docs");
        assert!(Route::parse("/docs").is_err());
    }

    #[test]
    fn test_transition_is_single_flight() {
        let mut host = RecordingHost::at(Locale::En, "/");
        let mut transition = Transition::new();

        let first = transition.start(|| host.replace("/", Locale::Pl)).unwrap();
        assert!(first.is_some());
        assert!(transition.is_pending());

        let second = transition.start(|| host.replace("/", Locale::De)).unwrap();
        assert!(second.is_none());
        assert_eq!(host.navigations.len(), 1);

        let done = transition.complete().unwrap();
        assert_eq!(done.to.locale, Locale::Pl);
        assert!(!transition.is_pending());
    }

    #[test]
    fn test_transition_error_leaves_guard_idle() {
        let mut host = RecordingHost::at(Locale::En, "/");
        let mut transition = Transition::new();

        let result = transition.start(|| host.replace("relative", Locale::Fr));
        assert!(result.is_err());
        assert!(!transition.is_pending());
    }

    #[test]
    fn test_is_locale_switch() {
        let navigation = Navigation {
            from: Route::new(Locale::En, "/a").unwrap(),
            to: Route::new(Locale::Fr, "/a").unwrap(),
        };
        assert!(navigation.is_locale_switch());
    }
}
