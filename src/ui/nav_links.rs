//! Navigation links shown in the header and the mobile menu.

use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::i18n::{self, Locale, Message};
use crate::ui::components::{BookOpenIcon, GithubIcon, HomeIcon};

/// Icon drawn next to a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkIcon {
    Home,
    BookOpen,
    Github,
}

impl LinkIcon {
    /// Render the icon.
    pub fn view(self) -> AnyView {
        match self {
            Self::Home => view! { <HomeIcon /> }.into_any(),
            Self::BookOpen => view! { <BookOpenIcon /> }.into_any(),
            Self::Github => view! { <GithubIcon /> }.into_any(),
        }
    }
}

/// Where a link points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Logical in-app path, localized on render.
    Internal(String),
    /// Absolute URL, opened in a new tab.
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Catalog key of the label; `None` for brand names that are never translated.
    pub label: Option<Message>,
    pub fallback_label: &'static str,
    pub icon: LinkIcon,
    pub target: LinkTarget,
}

impl NavLink {
    #[must_use]
    pub fn label(&self, locale: Locale) -> &'static str {
        self.label
            .map_or(self.fallback_label, |message| i18n::translate(locale, message))
    }

    #[must_use]
    pub fn href(&self, locale: Locale) -> String {
        match &self.target {
            LinkTarget::Internal(path) => i18n::localized_path(path, locale),
            LinkTarget::External(url) => url.clone(),
        }
    }

    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self.target, LinkTarget::External(_))
    }
}

/// Home, Get Started (docs) and GitHub (repository), in that order.
#[must_use]
pub fn default_links(site: &SiteConfig) -> Vec<NavLink> {
    vec![
        NavLink {
            label: Some(Message::Home),
            fallback_label: "Home",
            icon: LinkIcon::Home,
            target: LinkTarget::Internal("/".to_string()),
        },
        NavLink {
            label: Some(Message::GetStarted),
            fallback_label: "Get Started",
            icon: LinkIcon::BookOpen,
            target: LinkTarget::External(site.getting_started_url.clone()),
        },
        NavLink {
            label: None,
            fallback_label: "GitHub",
            icon: LinkIcon::Github,
            target: LinkTarget::External(site.repository_url.clone()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_default_links() {
        let config = AppConfig::defaults().unwrap();
        let links = default_links(&config.site);

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].href(Locale::Pl), "/pl");
        assert!(!links[0].is_external());
        assert_eq!(links[0].label(Locale::De), "Startseite");
        assert_eq!(links[1].href(Locale::Pl), config.site.getting_started_url);
        assert_eq!(links[1].label(Locale::Fr), "Commencer");
        assert_eq!(links[2].label(Locale::Pl), "GitHub");
        assert!(links[2].is_external());
    }
}
