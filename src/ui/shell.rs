//! Page document, header, footer and the routed pages.

use leptos::prelude::*;

use crate::config::SiteConfig;
use crate::i18n::{self, Locale, Message};
use crate::navigation::Route;
use crate::session::{GITHUB_PROVIDER, Session};
use crate::theme::Theme;
use crate::ui::components::{
    Avatar, BookOpenIcon, initials, Button, ButtonSize, ButtonVariant, GithubIcon, MoonIcon, SunIcon,
};
use crate::ui::lang_switcher::LangSwitcherView;
use crate::ui::mobile_menu::{MenuContext, MenuState, MobileMenuView};
use crate::ui::nav_links::NavLink;

/// Endpoint of the header theme toggle.
pub const THEME_ENDPOINT: &str = "/ui/theme";

/// Endpoint that ends the current session.
pub const SIGN_OUT_ENDPOINT: &str = "/auth/signout";

/// Pages reachable under a locale prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    NotFound,
}

impl Page {
    /// Resolve a logical (unprefixed) path.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        match path {
            "/" | "" => Self::Home,
            _ => Self::NotFound,
        }
    }
}

/// Everything a full page render needs.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub route: Route,
    pub theme: Theme,
    pub session: Option<Session>,
    pub site: SiteConfig,
    pub links: Vec<NavLink>,
    pub menu_state: MenuState,
}

/// Render `page` as a complete HTML document.
pub fn render_page(page: Page, context: PageContext) -> String {
    crate::ui::render_to_html(move || view! { <Document page=page context=context /> })
}

/// Sign-in URL that returns to `route` afterwards.
#[must_use]
pub fn sign_in_href(route: &Route) -> String {
    let callback: String = url::form_urlencoded::byte_serialize(route.href().as_bytes()).collect();
    format!("/auth/signin/{GITHUB_PROVIDER}?callbackUrl={callback}")
}

#[component]
fn Document(page: Page, context: PageContext) -> impl IntoView {
    let locale = context.route.locale;
    let title = match page {
        Page::Home => context.site.name.clone(),
        Page::NotFound => format!(
            "{} - {}",
            i18n::translate(locale, Message::NotFoundTitle),
            context.site.name
        ),
    };
    let description = i18n::translate(locale, Message::HomeDescription);
    let html_class = context.theme.as_str();
    let owner = context.site.owner.clone();

    let content = match page {
        Page::Home => view! { <HomePage locale=locale site=context.site.clone() /> }.into_any(),
        Page::NotFound => view! { <NotFoundPage locale=locale /> }.into_any(),
    };

    view! {
        <!doctype html>
        <html lang=locale.code() class=html_class>
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content=description />
                <title>{title}</title>

                // Local scripts only (no CDN)
                <script src="/static/vendor/htmx.min.js"></script>
                <script defer src="/static/vendor/alpine.min.js"></script>
                <link rel="stylesheet" href="/static/app.css" />
            </head>

            <body class="min-h-screen bg-background text-textPrimary antialiased">
                <div id="app-shell" class="flex min-h-screen flex-col">
                    <Header context=context />
                    <main id="app" class="container mx-auto max-w-5xl flex-1 px-4 py-6">
                        {content}
                    </main>
                    <Footer owner=owner />
                </div>
            </body>
        </html>
    }
}

#[component]
fn Header(context: PageContext) -> impl IntoView {
    let PageContext {
        route,
        theme,
        session,
        site,
        links,
        menu_state,
    } = context;
    let locale = route.locale;
    let home = i18n::localized_path("/", locale);

    let desktop_links = links
        .iter()
        .map(|link| {
            let target = link.is_external().then_some("_blank");
            let rel = link.is_external().then_some("noopener noreferrer");
            view! {
                <a
                    href=link.href(locale)
                    target=target
                    rel=rel
                    class="text-sm text-textMuted transition-colors hover:text-textPrimary"
                >
                    {link.label(locale)}
                </a>
            }
        })
        .collect_view();

    let menu = MenuContext {
        route: route.clone(),
        theme,
        session: session.clone(),
        owner: site.owner.clone(),
    };

    view! {
        <header class="sticky top-0 z-50 w-full border-b border-panelBorder bg-background/95 backdrop-blur">
            <div class="container mx-auto flex h-14 max-w-5xl items-center justify-between px-4">
                <a href=home class="flex items-center gap-2 font-semibold">
                    <span class="text-lg">{site.name.clone()}</span>
                </a>

                <nav class="hidden items-center gap-6 md:flex">{desktop_links}</nav>

                <div class="flex items-center gap-2">
                    <div class="hidden items-center gap-2 md:flex">
                        <LangSwitcherView route=route.clone() open=false pending=false />
                        <ThemeToggle route=route.clone() theme=theme />
                        <AccountArea route=route.clone() session=session />
                    </div>
                    <MobileMenuView state=menu_state pending=false links=links context=menu />
                </div>
            </div>
        </header>
    }
}

/// Header theme button. Shows the current theme's icon.
#[component]
fn ThemeToggle(route: Route, theme: Theme) -> impl IntoView {
    let locale = route.locale;
    let icon = match theme {
        Theme::Light => view! { <SunIcon /> }.into_any(),
        Theme::Dark => view! { <MoonIcon /> }.into_any(),
    };

    view! {
        <form method="post" action=THEME_ENDPOINT hx-post=THEME_ENDPOINT hx-sync="this:drop">
            <input type="hidden" name="pathname" value=route.path.clone() />
            <input type="hidden" name="locale" value=locale.code() />
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                button_type="submit"
                aria_label=i18n::translate(locale, Message::ToggleTheme)
            >
                {icon}
            </Button>
        </form>
    }
}

#[component]
fn AccountArea(route: Route, session: Option<Session>) -> impl IntoView {
    let locale = route.locale;
    let t = move |message| i18n::translate(locale, message);

    match session {
        Some(session) => {
            let name = session.display_name().to_string();
            let image = session.user().image.clone();
            view! {
                <form method="post" action=SIGN_OUT_ENDPOINT class="flex items-center gap-2">
                    <input type="hidden" name="callbackUrl" value=route.href() />
                    <Avatar src=image alt=name.clone() fallback=initials(&name) />
                    <span class="text-sm font-medium">{name}</span>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm button_type="submit">
                        {t(Message::SignOut)}
                    </Button>
                </form>
            }
            .into_any()
        }
        None => view! {
            <a href=sign_in_href(&route)>
                <Button size=ButtonSize::Sm>{t(Message::SignIn)}</Button>
            </a>
        }
        .into_any(),
    }
}

#[component]
fn Footer(owner: String) -> impl IntoView {
    let year = chrono::Datelike::year(&chrono::Utc::now());
    view! {
        <footer class="border-t border-panelBorder py-4">
            <div class="container mx-auto max-w-5xl px-4">
                <p class="text-center text-xs text-textMuted">{format!("© {year} {owner}")}</p>
            </div>
        </footer>
    }
}

#[component]
fn HomePage(locale: Locale, site: SiteConfig) -> impl IntoView {
    let t = move |message| i18n::translate(locale, message);

    view! {
        <section class="flex flex-col items-center justify-center gap-6 py-20 text-center">
            <h1 class="text-4xl font-bold">{t(Message::HomeTitle)}</h1>
            <p class="max-w-xl text-textMuted">{t(Message::HomeDescription)}</p>
            <div class="flex items-center gap-3">
                <a href=site.getting_started_url.clone() target="_blank" rel="noopener noreferrer">
                    <Button>
                        <BookOpenIcon class="mr-2" />
                        {t(Message::GetStarted)}
                    </Button>
                </a>
                <a href=site.repository_url.clone() target="_blank" rel="noopener noreferrer">
                    <Button variant=ButtonVariant::Outline>
                        <GithubIcon class="mr-2" />
                        "GitHub"
                    </Button>
                </a>
            </div>
        </section>
    }
}

#[component]
fn NotFoundPage(locale: Locale) -> impl IntoView {
    let t = move |message| i18n::translate(locale, message);

    view! {
        <div class="flex flex-col items-center justify-center py-20" data-page="not-found">
            <h1 class="mb-4 text-4xl font-bold">"404"</h1>
            <h2 class="mb-2 text-xl font-semibold">{t(Message::NotFoundTitle)}</h2>
            <p class="mb-6 text-textMuted">{t(Message::NotFoundBody)}</p>
            <a href=i18n::localized_path("/", locale)>
                <Button variant=ButtonVariant::Primary>{t(Message::GoHome)}</Button>
            </a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::session::{SessionStore, SessionUser};
    use crate::ui::nav_links::default_links;

    fn context(locale: Locale, session: Option<Session>) -> PageContext {
        let config = AppConfig::defaults().unwrap();
        PageContext {
            route: Route::new(locale, "/").unwrap(),
            theme: Theme::Dark,
            session,
            links: default_links(&config.site),
            site: config.site,
            menu_state: MenuState::Closed,
        }
    }

    #[test]
    fn test_resolve_pages() {
        assert_eq!(Page::resolve("/"), Page::Home);
        assert_eq!(Page::resolve("/missing"), Page::NotFound);
    }

    #[test]
    fn test_document_carries_locale_and_theme() {
        let html = render_page(Page::Home, context(Locale::Pl, None));

        assert!(html.to_ascii_lowercase().starts_with("<!doctype html>"));
        assert!(html.contains(r#"<html lang="pl" class="dark""#));
        assert!(html.contains("/static/vendor/htmx.min.js"));
        assert!(html.contains(r#"id="mobile-menu""#));
    }

    #[test]
    fn test_signed_out_header_links_to_sign_in() {
        let html = render_page(Page::Home, context(Locale::En, None));
        assert!(html.contains("/auth/signin/github?callbackUrl=%2Fen"));
    }

    #[test]
    fn test_signed_in_header_shows_sign_out() {
        let session = SessionStore::new().create(SessionUser {
            name: Some("Ada Lovelace".to_string()),
            email: None,
            image: None,
        });
        let html = render_page(Page::Home, context(Locale::De, Some(session)));

        assert!(html.contains("Abmelden"));
        assert!(html.contains(SIGN_OUT_ENDPOINT));
        assert!(html.contains("AL"));
    }

    #[test]
    fn test_not_found_page_is_localized() {
        let html = render_page(Page::NotFound, context(Locale::Fr, None));
        assert!(html.contains(r#"data-page="not-found""#));
        assert!(html.contains(i18n::translate(Locale::Fr, Message::NotFoundTitle)));
    }
}
