//! Sign-in redirect and sign-out.

use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::session::GITHUB_PROVIDER;
use crate::web::{
    RequestContext, cleared_session_cookie, end_session, local_callback, redirect,
};

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// `GET /auth/signin/{provider}` - redirect to the provider's authorize page.
pub async fn sign_in(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    if provider != GITHUB_PROVIDER {
        return Err(AppError::UnknownProvider(provider));
    }
    let Some(github) = &state.github else {
        return Err(AppError::AuthNotConfigured(provider));
    };

    let callback = local_callback(params.callback_url.as_deref());
    let url = github.authorize_url(callback)?;

    tracing::info!(
        name: "auth.signin.redirect",
        provider = %provider,
        callback = callback.unwrap_or("/"),
        "Redirecting to sign-in provider"
    );
    Ok(Redirect::temporary(url.as_str()).into_response())
}

/// `POST /auth/signout` - drop the session and clear its cookie.
pub async fn sign_out(
    State(state): State<AppState>,
    ctx: RequestContext,
    jar: CookieJar,
    Form(params): Form<CallbackParams>,
) -> Response {
    let target = local_callback(params.callback_url.as_deref()).unwrap_or("/");
    end_session(&state.sessions, ctx.session_token(), target);

    let jar = jar.add(cleared_session_cookie(state.config.auth.cookie_secure));
    (jar, redirect(ctx.htmx, target)).into_response()
}
