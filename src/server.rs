use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, header},
    middleware::Next,
    response::Response,
    routing::{get, post},
};
use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::info;

use crate::AppState;
use crate::config::AppConfig;
use crate::web::{actions, auth, pages};

const SECURITY_HEADERS: [(HeaderName, &str); 3] = [
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
];

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(pages::root))
        .route("/{locale}", get(pages::page))
        .route("/{locale}/{*path}", get(pages::page))
        .route("/ui/locale", post(actions::select_locale))
        .route("/ui/menu", post(actions::menu_event))
        .route("/ui/theme", post(actions::toggle_theme))
        .route("/auth/signin/{provider}", get(auth::sign_in))
        .route("/auth/signout", post(auth::sign_out))
        .nest_service("/static", static_dir)
        // Always installed; the config switch is read per request so the
        // router type does not depend on it.
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn security_headers(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    if state.config.security.headers_enabled {
        let headers = response.headers_mut();
        for (name, value) in SECURITY_HEADERS {
            headers
                .entry(name)
                .or_insert(HeaderValue::from_static(value));
        }
    }
    response
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let state = AppState::new(Arc::clone(&config));

    if state.github.is_none() {
        info!(name: "auth.github.disabled", "GitHub sign-in is not configured");
    }

    let app = router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        default_locale = %config.i18n.default_locale,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{StatusCode, header::LOCATION};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(Arc::new(AppConfig::defaults().unwrap()))
    }

    #[tokio::test]
    async fn test_non_canonical_prefix_redirects() {
        let response = router(state())
            .oneshot(axum::http::Request::get("/PL").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[LOCATION], "/pl");
    }

    #[tokio::test]
    async fn test_security_headers_on_errors() {
        let response = router(state())
            .oneshot(axum::http::Request::get("/static/missing.css").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }
}
