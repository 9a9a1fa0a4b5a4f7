//! HTTP glue between axum and the UI components.
//!
//! Each request builds a [`RequestContext`] from its cookies and headers and,
//! for UI events, a [`RequestHost`] that implements the collaborator traits
//! the components call out to. After the component has run, the handler turns
//! whatever the host recorded (a navigation, a theme flip, a sign-in or
//! sign-out) into the matching HTTP response.
//!
//! # Handlers
//!
//! - [`pages`]: locale redirects and full page renders
//! - [`actions`]: locale switch, menu events, theme toggle
//! - [`auth`]: sign-in redirect and sign-out

pub mod actions;
pub mod auth;
pub mod pages;

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{ACCEPT_LANGUAGE, LOCATION};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use url::Url;

use crate::AppState;
use crate::i18n::Locale;
use crate::navigation::{Navigation, NavigationError, Navigator, Route};
use crate::session::{SESSION_COOKIE, Session, SessionProvider, SessionStore};
use crate::theme::{THEME_COOKIE, Theme, ThemeStore};

pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");
pub const HX_REFRESH: HeaderName = HeaderName::from_static("hx-refresh");

/// Base used to resolve callback paths.
const LOCAL_ORIGIN: &str = "http://localhost";

/// Theme cookie lifetime.
const THEME_COOKIE_MAX_AGE: time::Duration = time::Duration::days(365);

/// Per-request view of the caller: theme, session and request kind.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub theme: Theme,
    pub session: Option<Session>,
    /// Whether the request was issued by HTMX.
    pub htmx: bool,
    pub accept_language: Option<String>,
    pub jar: CookieJar,
}

impl RequestContext {
    /// Token of the current session, if any.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.jar.get(SESSION_COOKIE).map(Cookie::value)
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app = AppState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let theme = jar
            .get(THEME_COOKIE)
            .and_then(|cookie| cookie.value().parse().ok())
            .unwrap_or(app.config.ui.default_theme);
        let session = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| app.sessions.get(cookie.value()));
        let htmx = parts
            .headers
            .get(HX_REQUEST)
            .is_some_and(|value| value == "true");
        let accept_language = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(Self {
            theme,
            session,
            htmx,
            accept_language,
            jar,
        })
    }
}

/// Sign-in or sign-out requested by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SignIn(String),
    SignOut,
}

/// Collaborator host for one request.
///
/// Nothing here has side effects outside the struct; handlers read the
/// recorded outcome afterwards.
#[derive(Debug)]
pub struct RequestHost {
    route: Route,
    theme: Theme,
    theme_changed: bool,
    navigation: Option<Navigation>,
    auth: Option<AuthAction>,
}

impl RequestHost {
    #[must_use]
    pub fn new(route: Route, theme: Theme) -> Self {
        Self {
            route,
            theme,
            theme_changed: false,
            navigation: None,
            auth: None,
        }
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The theme, if a component changed it.
    #[must_use]
    pub fn changed_theme(&self) -> Option<Theme> {
        self.theme_changed.then_some(self.theme)
    }

    #[must_use]
    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    #[must_use]
    pub fn auth(&self) -> Option<&AuthAction> {
        self.auth.as_ref()
    }
}

impl Navigator for RequestHost {
    fn pathname(&self) -> &str {
        &self.route.path
    }

    fn locale(&self) -> Locale {
        self.route.locale
    }

    fn replace(&mut self, path: &str, locale: Locale) -> Result<Navigation, NavigationError> {
        let to = Route::new(locale, path)?;
        let navigation = Navigation {
            from: std::mem::replace(&mut self.route, to.clone()),
            to,
        };
        self.navigation = Some(navigation.clone());
        Ok(navigation)
    }
}

impl ThemeStore for RequestHost {
    fn theme(&self) -> Theme {
        self.theme
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.theme_changed = true;
    }
}

impl SessionProvider for RequestHost {
    fn sign_in(&mut self, provider: &str) {
        self.auth = Some(AuthAction::SignIn(provider.to_string()));
    }

    fn sign_out(&mut self) {
        self.auth = Some(AuthAction::SignOut);
    }
}

/// Cookie persisting `theme` for a year.
#[must_use]
pub fn theme_cookie(theme: Theme) -> Cookie<'static> {
    Cookie::build((THEME_COOKIE, theme.as_str()))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(THEME_COOKIE_MAX_AGE)
        .build()
}

/// Expired session cookie.
#[must_use]
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Send the browser to `location`: `HX-Redirect` for HTMX requests,
/// `303 See Other` otherwise.
pub fn redirect(htmx: bool, location: &str) -> Response {
    if htmx {
        with_header(StatusCode::OK, HX_REDIRECT, location)
    } else {
        with_header(StatusCode::SEE_OTHER, LOCATION, location)
    }
}

/// Reload the current page: `HX-Refresh` for HTMX requests, `303` to
/// `location` otherwise.
pub fn refresh(htmx: bool, location: &str) -> Response {
    if htmx {
        (StatusCode::OK, [(HX_REFRESH, HeaderValue::from_static("true"))]).into_response()
    } else {
        with_header(StatusCode::SEE_OTHER, LOCATION, location)
    }
}

/// `307 Temporary Redirect` to `location`.
pub fn temporary_redirect(location: &str) -> Response {
    with_header(StatusCode::TEMPORARY_REDIRECT, LOCATION, location)
}

fn with_header(status: StatusCode, name: HeaderName, value: &str) -> Response {
    match HeaderValue::from_str(value) {
        Ok(value) => (status, [(name, value)]).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid redirect target").into_response(),
    }
}

/// Keep `callback` only if it is a local absolute path.
///
/// The path must resolve to the same origin as a bare path would.
/// Backslashes and control characters are rejected outright, since
/// browsers read `/\host` as `//host`.
#[must_use]
pub fn local_callback(callback: Option<&str>) -> Option<&str> {
    callback.filter(|url| is_local_path(url))
}

fn is_local_path(candidate: &str) -> bool {
    if !candidate.starts_with('/')
        || candidate.starts_with("//")
        || candidate.contains('\\')
        || candidate.chars().any(char::is_control)
    {
        return false;
    }
    let Ok(base) = Url::parse(LOCAL_ORIGIN) else {
        return false;
    };
    base.join(candidate)
        .is_ok_and(|resolved| resolved.origin() == base.origin())
}

/// Drop the session behind `token`, if any. Returns whether one was removed.
pub fn end_session(sessions: &SessionStore, token: Option<&str>, path: &str) -> bool {
    let removed = token.and_then(|token| sessions.remove(token));
    let age_secs = removed
        .as_ref()
        .map(|session| (Utc::now() - session.created_at()).num_seconds());
    tracing::info!(
        name: "auth.signout",
        removed = removed.is_some(),
        session_age_secs = ?age_secs,
        path,
        "Signed out"
    );
    removed.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::toggle_theme;

    #[test]
    fn test_host_records_navigation() {
        let mut host = RequestHost::new(Route::new(Locale::En, "/docs").unwrap(), Theme::Dark);
        let navigation = host.replace("/docs", Locale::Fr).unwrap();

        assert_eq!(navigation.from.locale, Locale::En);
        assert_eq!(host.locale(), Locale::Fr);
        assert_eq!(host.navigation().unwrap().to.href(), "/fr/docs");
    }

    #[test]
    fn test_host_records_theme_and_auth() {
        let mut host = RequestHost::new(Route::new(Locale::En, "/").unwrap(), Theme::Dark);
        assert_eq!(host.changed_theme(), None);

        toggle_theme(&mut host);
        assert_eq!(host.changed_theme(), Some(Theme::Light));

        host.sign_in("github");
        assert_eq!(host.auth(), Some(&AuthAction::SignIn("github".to_string())));
        host.sign_out();
        assert_eq!(host.auth(), Some(&AuthAction::SignOut));
    }

    #[test]
    fn test_local_callback() {
        assert_eq!(local_callback(Some("/pl")), Some("/pl"));
        assert_eq!(local_callback(Some("//evil.test")), None);
        assert_eq!(local_callback(Some("https://evil.test")), None);
        assert_eq!(local_callback(None), None);
    }

    #[test]
    fn test_local_callback_rejects_backslash_hosts() {
        assert_eq!(local_callback(Some("/\\evil.test")), None);
        assert_eq!(local_callback(Some("/docs\\..\\x")), None);
        assert_eq!(local_callback(Some("/\t/evil.test")), None);
        assert_eq!(local_callback(Some("/de/docs?tab=1")), Some("/de/docs?tab=1"));
    }

    #[test]
    fn test_end_session_removes_only_known_tokens() {
        let store = SessionStore::new();
        let session = store.create(crate::session::SessionUser::default());

        assert!(!end_session(&store, Some("unknown"), "/"));
        assert!(!end_session(&store, None, "/"));
        assert!(end_session(&store, Some(session.id()), "/"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_redirect_kinds() {
        let htmx = redirect(true, "/pl");
        assert_eq!(htmx.status(), StatusCode::OK);
        assert_eq!(htmx.headers()[HX_REDIRECT], "/pl");

        let plain = redirect(false, "/pl");
        assert_eq!(plain.status(), StatusCode::SEE_OTHER);
        assert_eq!(plain.headers()[LOCATION], "/pl");
    }
}
