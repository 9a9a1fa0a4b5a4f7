use std::sync::Arc;

use axum::http::header::{ACCEPT_LANGUAGE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::json;
use starter_shell::AppState;
use starter_shell::config::AppConfig;
use starter_shell::i18n::{Locale, Message, translate};
use starter_shell::server::router;
use starter_shell::session::SessionUser;

const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");

fn config() -> AppConfig {
    AppConfig::defaults().expect("defaults should load")
}

fn server_with(config: AppConfig) -> (TestServer, AppState) {
    let state = AppState::new(Arc::new(config));
    let server = TestServer::new(router(state.clone())).expect("server should start");
    (server, state)
}

fn server() -> TestServer {
    server_with(config()).0
}

fn htmx() -> HeaderValue {
    HeaderValue::from_static("true")
}

fn header(response: &axum_test::TestResponse, name: &HeaderName) -> String {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn set_cookies(response: &axum_test::TestResponse) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect()
}

#[tokio::test]
async fn test_root_redirects_to_negotiated_locale() {
    let server = server();

    let response = server
        .get("/")
        .add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("fr-CA,fr;q=0.9,en;q=0.5"))
        .await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header(&response, &LOCATION), "/fr");

    let response = server.get("/").await;
    assert_eq!(header(&response, &LOCATION), "/en");
}

#[tokio::test]
async fn test_unprefixed_path_redirects() {
    let server = server();

    let response = server
        .get("/about")
        .add_header(ACCEPT_LANGUAGE, HeaderValue::from_static("pl"))
        .await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header(&response, &LOCATION), "/pl/about");
}

#[tokio::test]
async fn test_localized_home_renders() {
    let server = server();

    let response = server.get("/pl").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains(r#"lang="pl""#));
    assert!(html.contains(r#"class="dark""#));
    assert!(html.contains(translate(Locale::Pl, Message::SignIn)));
    assert!(!html.contains(translate(Locale::Pl, Message::SignOut)));
}

#[tokio::test]
async fn test_unknown_page_is_localized_404() {
    let server = server();

    let response = server.get("/de/nowhere").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains(r#"data-page="not-found""#));
}

#[tokio::test]
async fn test_theme_cookie_is_applied() {
    let server = server();

    let response = server
        .get("/en")
        .add_header(COOKIE, HeaderValue::from_static("theme=light"))
        .await;
    assert!(response.text().contains(r#"class="light""#));
}

#[tokio::test]
async fn test_security_headers_present() {
    let server = server();

    let response = server.get("/en").await;
    assert_eq!(header(&response, &HeaderName::from_static("x-frame-options")), "DENY");
    assert_eq!(
        header(&response, &HeaderName::from_static("x-content-type-options")),
        "nosniff"
    );
    assert_eq!(
        header(&response, &HeaderName::from_static("referrer-policy")),
        "strict-origin-when-cross-origin"
    );
}

#[tokio::test]
async fn test_security_headers_can_be_disabled() {
    let mut config = config();
    config.security.headers_enabled = false;
    let (server, _) = server_with(config);

    let response = server.get("/en").await;
    assert!(response.headers().get("x-frame-options").is_none());
}

#[tokio::test]
async fn test_locale_switch_redirects_htmx() {
    let server = server();

    let response = server
        .post("/ui/locale")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({ "pathname": "/docs", "current": "en", "locale": "de" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(header(&response, &HeaderName::from_static("hx-redirect")), "/de/docs");
}

#[tokio::test]
async fn test_locale_switch_to_current_is_noop() {
    let server = server();

    let response = server
        .post("/ui/locale")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({ "pathname": "/", "current": "pl", "locale": "pl" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(response.headers().get("hx-redirect").is_none());
}

#[tokio::test]
async fn test_locale_switch_plain_post_uses_see_other() {
    let server = server();

    let response = server
        .post("/ui/locale")
        .form(&json!({ "pathname": "/", "current": "en", "locale": "fr" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(header(&response, &LOCATION), "/fr");
}

#[tokio::test]
async fn test_locale_switch_rejects_prefixed_path() {
    let server = server();

    let response = server
        .post("/ui/locale")
        .form(&json!({ "pathname": "/pl/docs", "current": "en", "locale": "fr" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_menu_open_returns_fragment() {
    let server = server();

    let response = server
        .post("/ui/menu")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({ "pathname": "/", "locale": "en", "state": "closed", "event": "open" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains(r#"id="mobile-menu""#));
    assert!(html.contains(r#"name="state" value="open""#));
    assert!(html.contains("Sign in with GitHub"));
}

#[tokio::test]
async fn test_menu_expands_languages() {
    let server = server();

    let response = server
        .post("/ui/menu")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({ "pathname": "/", "locale": "en", "state": "open", "event": "toggle-languages" }))
        .await;

    let html = response.text();
    assert!(html.contains(r#"name="state" value="open-languages""#));
    assert!(html.contains("select-locale:fr"));
}

#[tokio::test]
async fn test_menu_locale_selection_keeps_panel_open() {
    let server = server();

    let response = server
        .post("/ui/menu")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({
            "pathname": "/",
            "locale": "en",
            "state": "open-languages",
            "event": "select-locale:pl",
        }))
        .await;
    assert_eq!(header(&response, &HeaderName::from_static("hx-redirect")), "/pl?menu=open");
}

#[tokio::test]
async fn test_menu_rejects_unknown_event() {
    let server = server();

    let response = server
        .post("/ui/menu")
        .form(&json!({ "pathname": "/", "locale": "en", "state": "open", "event": "explode" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_menu_theme_toggle_sets_cookie() {
    let server = server();

    let response = server
        .post("/ui/menu")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({ "pathname": "/", "locale": "en", "state": "open", "event": "toggle-theme" }))
        .await;
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("theme=light")));
    assert_eq!(header(&response, &HeaderName::from_static("hx-redirect")), "/en?menu=open");
}

#[tokio::test]
async fn test_menu_sign_in_redirects_to_provider() {
    let server = server();

    let response = server
        .post("/ui/menu")
        .add_header(HX_REQUEST, htmx())
        .form(&json!({ "pathname": "/docs", "locale": "pl", "state": "open", "event": "sign-in" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        header(&response, &HeaderName::from_static("hx-redirect")),
        "/auth/signin/github?callbackUrl=%2Fpl%2Fdocs"
    );
}

#[tokio::test]
async fn test_menu_sign_out_ends_session() {
    let (server, state) = server_with(config());
    let session = state.sessions.create(SessionUser {
        name: Some("Octo Cat".to_string()),
        email: None,
        image: None,
    });
    let cookie = HeaderValue::from_str(&format!("session_token={}", session.id())).unwrap();

    let response = server
        .post("/ui/menu")
        .add_header(HX_REQUEST, htmx())
        .add_header(COOKIE, cookie)
        .form(&json!({ "pathname": "/", "locale": "de", "state": "open", "event": "sign-out" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(header(&response, &HeaderName::from_static("hx-refresh")), "true");
    assert!(state.sessions.is_empty());
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("session_token=")));
}

#[tokio::test]
async fn test_theme_toggle_flips_cookie() {
    let server = server();

    let response = server
        .post("/ui/theme")
        .add_header(HX_REQUEST, htmx())
        .add_header(COOKIE, HeaderValue::from_static("theme=light"))
        .form(&json!({ "pathname": "/", "locale": "en" }))
        .await;
    assert_eq!(header(&response, &HeaderName::from_static("hx-refresh")), "true");
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("theme=dark")));
}

#[tokio::test]
async fn test_sign_in_unconfigured_is_unavailable() {
    let server = server();

    let response = server.get("/auth/signin/github").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let response = server.get("/auth/signin/gitlab").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sign_in_redirects_to_github() {
    let mut config = config();
    config.auth.github_client_id = Some("client-123".to_string());
    config.auth.github_redirect_uri = Some("https://app.example.com/auth/callback/github".to_string());
    let (server, _) = server_with(config);

    let response = server.get("/auth/signin/github?callbackUrl=%2Fpl").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);

    let location = header(&response, &LOCATION);
    assert!(location.starts_with("https://github.com/login/oauth/authorize?"));
    assert!(location.contains("client_id=client-123"));
}

#[tokio::test]
async fn test_sign_out_removes_session() {
    let (server, state) = server_with(config());
    let session = state.sessions.create(SessionUser {
        name: Some("Octo Cat".to_string()),
        email: Some("octo@example.com".to_string()),
        image: None,
    });
    let cookie = HeaderValue::from_str(&format!("session_token={}", session.id())).unwrap();

    let page = server.get("/en").add_header(COOKIE, cookie.clone()).await;
    assert!(page.text().contains("Octo Cat"));

    let response = server
        .post("/auth/signout")
        .add_header(COOKIE, cookie)
        .form(&json!({ "callbackUrl": "/pl" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(header(&response, &LOCATION), "/pl");
    assert!(state.sessions.is_empty());
    assert!(set_cookies(&response).iter().any(|c| c.starts_with("session_token=")));
}

#[tokio::test]
async fn test_sign_out_ignores_foreign_callback() {
    let server = server();

    let response = server
        .post("/auth/signout")
        .form(&json!({ "callbackUrl": "https://evil.test" }))
        .await;
    assert_eq!(header(&response, &LOCATION), "/");
}

#[tokio::test]
async fn test_sign_out_ignores_backslash_callback() {
    let server = server();

    let response = server
        .post("/auth/signout")
        .form(&json!({ "callbackUrl": "/\\evil.test" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(header(&response, &LOCATION), "/");
}

#[tokio::test]
async fn test_sign_in_drops_backslash_callback() {
    let mut config = config();
    config.auth.github_client_id = Some("client-123".to_string());
    config.auth.github_redirect_uri = Some("https://app.example.com/auth/callback/github".to_string());
    let (server, _) = server_with(config);

    let response = server.get("/auth/signin/github?callbackUrl=%2F%5Cevil.test").await;
    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert!(!header(&response, &LOCATION).contains("evil.test"));
}
