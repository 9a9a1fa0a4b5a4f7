//! UI message catalog.
//!
//! Translations live in per-locale Fluent resources under `assets/i18n/`,
//! embedded into the binary. They are formatted once, on first lookup.
//! [`translate`] is total: a key missing from a locale falls back to
//! English, then to the key itself.

use std::collections::HashMap;
use std::sync::LazyLock;

use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use unic_langid::LanguageIdentifier;

use super::Locale;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

type Catalog = HashMap<Locale, HashMap<&'static str, String>>;

static CATALOG: LazyLock<Catalog> = LazyLock::new(load_catalog);

/// Translatable UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    HomeTitle,
    HomeDescription,
    GetStarted,
    Home,
    SignIn,
    SignOut,
    SignInWithGithub,
    Navigation,
    Settings,
    Account,
    Theme,
    Light,
    Dark,
    ToggleTheme,
    Language,
    ChangeLanguage,
    Menu,
    OpenMenu,
    CloseMenu,
    NotFoundTitle,
    NotFoundBody,
    GoHome,
}

impl Message {
    pub const ALL: [Message; 22] = [
        Self::HomeTitle,
        Self::HomeDescription,
        Self::GetStarted,
        Self::Home,
        Self::SignIn,
        Self::SignOut,
        Self::SignInWithGithub,
        Self::Navigation,
        Self::Settings,
        Self::Account,
        Self::Theme,
        Self::Light,
        Self::Dark,
        Self::ToggleTheme,
        Self::Language,
        Self::ChangeLanguage,
        Self::Menu,
        Self::OpenMenu,
        Self::CloseMenu,
        Self::NotFoundTitle,
        Self::NotFoundBody,
        Self::GoHome,
    ];

    /// Fluent message id.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::HomeTitle => "home-title",
            Self::HomeDescription => "home-description",
            Self::GetStarted => "get-started",
            Self::Home => "home",
            Self::SignIn => "sign-in",
            Self::SignOut => "sign-out",
            Self::SignInWithGithub => "sign-in-with-github",
            Self::Navigation => "navigation",
            Self::Settings => "settings",
            Self::Account => "account",
            Self::Theme => "theme",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::ToggleTheme => "toggle-theme",
            Self::Language => "language",
            Self::ChangeLanguage => "change-language",
            Self::Menu => "menu",
            Self::OpenMenu => "open-menu",
            Self::CloseMenu => "close-menu",
            Self::NotFoundTitle => "not-found-title",
            Self::NotFoundBody => "not-found-body",
            Self::GoHome => "go-home",
        }
    }
}

/// Translate `message` into `locale`.
#[must_use]
pub fn translate(locale: Locale, message: Message) -> &'static str {
    lookup(locale, message)
        .or_else(|| lookup(Locale::default(), message))
        .unwrap_or_else(|| message.key())
}

fn lookup(locale: Locale, message: Message) -> Option<&'static str> {
    let catalog: &'static Catalog = &CATALOG;
    catalog
        .get(&locale)?
        .get(message.key())
        .map(String::as_str)
}

fn load_catalog() -> Catalog {
    let mut catalog = HashMap::new();

    for file in Asset::iter() {
        let filename = file.as_ref();
        let Some(tag) = filename.strip_suffix(".ftl") else {
            continue;
        };
        let Some(langid) = tag.parse::<LanguageIdentifier>().ok() else {
            tracing::warn!(name: "i18n.resource.skipped", file = filename, "Unrecognized locale tag");
            continue;
        };
        let Some(locale) = Locale::from_langid(&langid) else {
            continue;
        };
        let Some(content) = Asset::get(filename) else {
            continue;
        };

        let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
        let resource = FluentResource::try_new(source).unwrap_or_else(|(resource, errors)| {
            tracing::error!(name: "i18n.resource.invalid", file = filename, errors = ?errors, "Fluent parse errors");
            resource
        });

        let mut bundle = FluentBundle::new(vec![langid]);
        bundle.set_use_isolating(false);
        if let Err(errors) = bundle.add_resource(resource) {
            tracing::error!(name: "i18n.resource.invalid", file = filename, errors = ?errors, "Fluent resource rejected");
        }

        catalog.insert(locale, format_all(&bundle));
    }

    catalog
}

fn format_all(bundle: &FluentBundle<FluentResource>) -> HashMap<&'static str, String> {
    Message::ALL
        .iter()
        .filter_map(|message| {
            let pattern = bundle.get_message(message.key())?.value()?;
            let mut errors = vec![];
            let value = bundle.format_pattern(pattern, None, &mut errors);
            errors
                .is_empty()
                .then(|| (message.key(), value.into_owned()))
        })
        .collect()
}
