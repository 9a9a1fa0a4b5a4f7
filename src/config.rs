use clap::Parser;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

use crate::i18n::Locale;
use crate::theme::Theme;

/// Prefix of environment variables read by [`AppConfig::load`].
pub const ENV_PREFIX: &str = "STARTER";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Host to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub i18n: I18nConfig,
    pub ui: UiConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub name: String,
    /// Shown in the footer copyright line.
    pub owner: String,
    pub repository_url: String,
    pub getting_started_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct I18nConfig {
    pub default_locale: Locale,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub default_theme: Theme,
    pub close_menu_on_locale_select: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub github_client_id: Option<String>,
    pub github_redirect_uri: Option<String>,
    pub cookie_secure: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub headers_enabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub json: bool,
}

fn with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.port", 3000)?
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.static_dir", "static")?
        .set_default("site.name", "Next Starter")?
        .set_default("site.owner", "Maksym Lypivskyi")?
        .set_default("site.repository_url", "https://github.com/lmaksym/next-starter")?
        .set_default(
            "site.getting_started_url",
            "https://github.com/lmaksym/next-starter/blob/main/README.md#getting-started",
        )?
        .set_default("i18n.default_locale", "en")?
        .set_default("ui.default_theme", "dark")?
        .set_default("ui.close_menu_on_locale_select", false)?
        .set_default("auth.cookie_secure", false)?
        .set_default("security.headers_enabled", true)?
        .set_default("log.json", false)
}

impl AppConfig {
    /// Configuration made of built-in defaults only.
    pub fn defaults() -> Result<Self, config::ConfigError> {
        with_defaults()?.build()?.try_deserialize()
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Load configuration with priority CLI flag > env var > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = with_defaults()?;

        // Explicit file is required; the cwd fallback is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // e.g. STARTER_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("log.json", json)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::defaults().unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.i18n.default_locale, Locale::En);
        assert_eq!(config.ui.default_theme, Theme::Dark);
        assert!(!config.ui.close_menu_on_locale_select);
        assert!(config.auth.github_client_id.is_none());
        assert!(config.security.headers_enabled);
    }
}
