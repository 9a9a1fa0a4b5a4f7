//! UI event handlers posted by the Locale Switcher, the Mobile Menu and the
//! header theme toggle.

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::i18n::Locale;
use crate::navigation::Route;
use crate::theme::toggle_theme as flip_theme;
use crate::ui::mobile_menu::{MenuConfig, MenuContext, MenuEvent, MenuState, MobileMenu};
use crate::ui::nav_links::default_links;
use crate::ui::shell::sign_in_href;
use crate::ui::{LangSwitcher, render_to_html};
use crate::web::{
    AuthAction, RequestContext, RequestHost, cleared_session_cookie, end_session, redirect,
    refresh, theme_cookie,
};

#[derive(Debug, Deserialize)]
pub struct LocaleForm {
    pub pathname: String,
    pub current: Locale,
    pub locale: Locale,
}

/// `POST /ui/locale` - Locale Switcher selection.
///
/// Selecting the current locale answers `204` to HTMX (nothing to do) and
/// sends plain form posts back to the page they came from.
pub async fn select_locale(
    ctx: RequestContext,
    Form(form): Form<LocaleForm>,
) -> Result<Response, AppError> {
    let route = Route::new(form.current, form.pathname)?;
    let mut host = RequestHost::new(route, ctx.theme);
    let mut switcher = LangSwitcher::new();

    match switcher.select(&mut host, form.locale)? {
        Some(navigation) => Ok(redirect(ctx.htmx, &navigation.to.href())),
        None if ctx.htmx => Ok(StatusCode::NO_CONTENT.into_response()),
        None => Ok(redirect(false, &host.route().href())),
    }
}

#[derive(Debug, Deserialize)]
pub struct MenuForm {
    pub pathname: String,
    pub locale: Locale,
    pub state: String,
    pub event: String,
}

/// `POST /ui/menu` - Mobile Menu event.
///
/// Replies with the re-rendered menu fragment unless the event left the
/// page: a locale switch or sign-in redirects, a theme flip or sign-out
/// reloads the page (keeping the panel's state).
pub async fn menu_event(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Form(form): Form<MenuForm>,
) -> Result<Response, AppError> {
    let menu_state: MenuState = form.state.parse()?;
    let event: MenuEvent = form.event.parse()?;
    let route = Route::new(form.locale, form.pathname)?;

    tracing::debug!(name: "menu.event", %event, state = %menu_state, path = %route.path, "Menu event");

    let mut host = RequestHost::new(route.clone(), ctx.theme);
    let mut menu = MobileMenu::new(
        default_links(&state.config.site),
        MenuConfig::from(&state.config.ui),
    )
    .with_state(menu_state);

    if let Some(navigation) = menu.handle(event, &mut host)? {
        let mut target = navigation.to.href();
        if menu.is_open() {
            target = format!("{target}?menu={}", menu.state());
        }
        return Ok(redirect(ctx.htmx, &target));
    }

    match host.auth() {
        Some(AuthAction::SignIn(_)) => return Ok(redirect(ctx.htmx, &sign_in_href(&route))),
        Some(AuthAction::SignOut) => {
            end_session(&state.sessions, ctx.session_token(), &route.path);
            let jar = jar.add(cleared_session_cookie(state.config.auth.cookie_secure));
            return Ok((jar, refresh(ctx.htmx, &route.href())).into_response());
        }
        None => {}
    }

    if let Some(theme) = host.changed_theme() {
        let jar = jar.add(theme_cookie(theme));
        let target = format!("{}?menu={}", route.href(), menu.state());
        return Ok((jar, redirect(ctx.htmx, &target)).into_response());
    }

    if !ctx.htmx {
        let target = match menu.state() {
            MenuState::Closed => route.href(),
            open => format!("{}?menu={open}", route.href()),
        };
        return Ok(redirect(false, &target));
    }

    let context = MenuContext {
        route,
        theme: ctx.theme,
        session: ctx.session,
        owner: state.config.site.owner.clone(),
    };
    Ok(Html(render_to_html(|| menu.view(context))).into_response())
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub pathname: String,
    pub locale: Locale,
}

/// `POST /ui/theme` - flip the theme cookie.
pub async fn toggle_theme(
    ctx: RequestContext,
    jar: CookieJar,
    Form(form): Form<ThemeForm>,
) -> Result<Response, AppError> {
    let route = Route::new(form.locale, form.pathname)?;
    let mut host = RequestHost::new(route, ctx.theme);
    let theme = flip_theme(&mut host);

    let jar = jar.add(theme_cookie(theme));
    Ok((jar, refresh(ctx.htmx, &host.route().href())).into_response())
}

