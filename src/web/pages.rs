//! Page routes: locale negotiation and full-page renders.

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::AppState;
use crate::i18n::{self, Locale};
use crate::navigation::Route;
use crate::ui::mobile_menu::MenuState;
use crate::ui::nav_links::default_links;
use crate::ui::shell::{Page, PageContext, render_page};
use crate::web::{RequestContext, temporary_redirect};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// Menu state to render with (wire form), used to keep the panel open
    /// across a reload.
    pub menu: Option<String>,
}

fn negotiated(state: &AppState, ctx: &RequestContext) -> Locale {
    i18n::negotiate(
        ctx.accept_language.as_deref(),
        state.config.i18n.default_locale,
    )
}

/// `GET /` - redirect to the caller's preferred locale.
pub async fn root(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let locale = negotiated(&state, &ctx);
    temporary_redirect(&i18n::localized_path("/", locale))
}

/// `GET /{locale}` and `GET /{locale}/{*path}` - render a page.
///
/// Paths without a supported locale prefix are redirected to the same path
/// under the negotiated locale; non-canonical prefixes (`/PL`) to the
/// canonical one.
pub async fn page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(query): Query<PageQuery>,
    uri: Uri,
) -> Response {
    let url_path = uri.path();
    let route = match Route::parse(url_path) {
        Ok(route) => route,
        Err(_) => {
            let target = i18n::localized_path(url_path, negotiated(&state, &ctx));
            return temporary_redirect(&with_query(target, uri.query()));
        }
    };
    if route.href() != url_path {
        return temporary_redirect(&with_query(route.href(), uri.query()));
    }

    let page = Page::resolve(&route.path);
    let menu_state = query
        .menu
        .and_then(|menu| menu.parse().ok())
        .unwrap_or(MenuState::Closed);

    let html = render_page(
        page,
        PageContext {
            route,
            theme: ctx.theme,
            session: ctx.session,
            site: state.config.site.clone(),
            links: default_links(&state.config.site),
            menu_state,
        },
    );

    let status = match page {
        Page::Home => StatusCode::OK,
        Page::NotFound => StatusCode::NOT_FOUND,
    };
    (status, Html(html)).into_response()
}

fn with_query(path: String, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path,
    }
}
