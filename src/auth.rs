//! GitHub sign-in redirect.
//!
//! Only the start of the OAuth flow lives here: building the authorize URL
//! the browser is sent to. Completing the flow is the provider's business.

use url::Url;

use crate::config::AuthConfig;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const SCOPE: &str = "read:user user:email";

/// GitHub OAuth application settings.
#[derive(Debug, Clone)]
pub struct GithubProvider {
    pub client_id: String,
    pub redirect_uri: String,
}

impl GithubProvider {
    /// Build from config. Returns `None` if the client id or redirect URI is
    /// missing (sign-in will be disabled).
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Option<Self> {
        let client_id = config.github_client_id.clone().filter(|s| !s.trim().is_empty())?;
        let redirect_uri = config
            .github_redirect_uri
            .clone()
            .filter(|s| !s.trim().is_empty())?;
        Some(Self {
            client_id,
            redirect_uri,
        })
    }

    /// GitHub authorization URL. `callback_url` is where the user lands after
    /// signing in and is carried on the redirect URI.
    pub fn authorize_url(&self, callback_url: Option<&str>) -> Result<Url, url::ParseError> {
        let mut redirect = Url::parse(&self.redirect_uri)?;
        if let Some(callback) = callback_url {
            redirect
                .query_pairs_mut()
                .append_pair("callbackUrl", callback);
        }

        Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", redirect.as_str()),
                ("scope", SCOPE),
            ],
        )
    }
}
