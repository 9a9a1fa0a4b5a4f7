//! Mobile Menu: slide-out panel with navigation, settings and account.
//!
//! # State machine
//!
//! ```text
//!            open                toggle-languages
//! Closed ─────────▶ Open(Collapsed) ◀──────────▶ Open(Expanded)
//!   ▲                     │                            │
//!   └──── close / link / sign-in / sign-out ───────────┘
//! ```
//!
//! Selecting a locale from the expanded list starts the same navigation as
//! the [`LangSwitcher`](super::LangSwitcher) and collapses the list; the
//! panel stays open unless [`MenuConfig::close_on_locale_select`] is set.
//! Closing always resets the list to collapsed.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use leptos::prelude::*;

use crate::config::UiConfig;
use crate::i18n::{self, Locale, Message};
use crate::navigation::{Navigation, NavigationError, Navigator, Route, Transition};
use crate::session::{GITHUB_PROVIDER, Session, SessionProvider};
use crate::theme::{self, Theme, ThemeStore};
use crate::ui::Host;
use crate::ui::components::{Button, ButtonSize, ButtonVariant, GlobeIcon, MenuIcon, MoonIcon, SunIcon, XIcon};
use crate::ui::lang_switcher::locale_options;
use crate::ui::nav_links::NavLink;

/// Endpoint the menu posts its events to.
pub const MENU_ENDPOINT: &str = "/ui/menu";

/// DOM id of the menu fragment swapped by HTMX.
pub const MENU_ID: &str = "mobile-menu";

/// Visibility of the locale sub-list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LanguageList {
    #[default]
    Collapsed,
    Expanded,
}

impl LanguageList {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }
}

/// Reachable states of the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open(LanguageList),
}

impl MenuState {
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }

    #[must_use]
    pub fn languages_expanded(self) -> bool {
        matches!(self, Self::Open(LanguageList::Expanded))
    }

    /// Wire form carried in the menu form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open(LanguageList::Collapsed) => "open",
            Self::Open(LanguageList::Expanded) => "open-languages",
        }
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid menu state `{0}`")]
pub struct InvalidMenuState(pub String);

impl FromStr for MenuState {
    type Err = InvalidMenuState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "closed" => Ok(Self::Closed),
            "open" => Ok(Self::Open(LanguageList::Collapsed)),
            "open-languages" => Ok(Self::Open(LanguageList::Expanded)),
            other => Err(InvalidMenuState(other.to_string())),
        }
    }
}

/// A user intent reported by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    Open,
    Close,
    ToggleLanguages,
    SelectLocale(Locale),
    /// Index into the menu's link list.
    FollowLink(usize),
    ToggleTheme,
    SignIn,
    SignOut,
}

impl fmt::Display for MenuEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Close => f.write_str("close"),
            Self::ToggleLanguages => f.write_str("toggle-languages"),
            Self::SelectLocale(locale) => write!(f, "select-locale:{locale}"),
            Self::FollowLink(index) => write!(f, "follow-link:{index}"),
            Self::ToggleTheme => f.write_str("toggle-theme"),
            Self::SignIn => f.write_str("sign-in"),
            Self::SignOut => f.write_str("sign-out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid menu event `{0}`")]
pub struct InvalidMenuEvent(pub String);

impl FromStr for MenuEvent {
    type Err = InvalidMenuEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMenuEvent(s.to_string());
        let (name, argument) = match s.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (s, None),
        };

        match (name, argument) {
            ("open", None) => Ok(Self::Open),
            ("close", None) => Ok(Self::Close),
            ("toggle-languages", None) => Ok(Self::ToggleLanguages),
            ("select-locale", Some(code)) => {
                code.parse().map(Self::SelectLocale).map_err(|_| invalid())
            }
            ("follow-link", Some(index)) => {
                index.parse().map(Self::FollowLink).map_err(|_| invalid())
            }
            ("toggle-theme", None) => Ok(Self::ToggleTheme),
            ("sign-in", None) => Ok(Self::SignIn),
            ("sign-out", None) => Ok(Self::SignOut),
            _ => Err(invalid()),
        }
    }
}

/// Behavior switches for the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuConfig {
    /// Close the whole panel (not just the locale list) after a locale pick.
    pub close_on_locale_select: bool,
}

impl From<&UiConfig> for MenuConfig {
    fn from(config: &UiConfig) -> Self {
        Self {
            close_on_locale_select: config.close_menu_on_locale_select,
        }
    }
}

/// What the account section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountSection {
    SignedIn { name: String, email: String },
    SignedOut,
}

impl AccountSection {
    #[must_use]
    pub fn from_session(session: Option<&Session>) -> Self {
        match session {
            Some(session) => Self::SignedIn {
                name: session.user().name.clone().unwrap_or_default(),
                email: session.user().email.clone().unwrap_or_default(),
            },
            None => Self::SignedOut,
        }
    }
}

/// Read-only inputs the menu renders from.
#[derive(Debug, Clone)]
pub struct MenuContext {
    pub route: Route,
    pub theme: Theme,
    pub session: Option<Session>,
    /// Footer copyright holder.
    pub owner: String,
}

#[derive(Debug)]
pub struct MobileMenu {
    state: MenuState,
    links: Vec<NavLink>,
    config: MenuConfig,
    transition: Transition,
}

impl MobileMenu {
    #[must_use]
    pub fn new(links: Vec<NavLink>, config: MenuConfig) -> Self {
        Self {
            state: MenuState::Closed,
            links,
            config,
            transition: Transition::new(),
        }
    }

    /// Resume from a state reported by the browser.
    #[must_use]
    pub fn with_state(mut self, state: MenuState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn languages_expanded(&self) -> bool {
        self.state.languages_expanded()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.transition.is_pending()
    }

    #[must_use]
    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn open(&mut self) {
        if self.state == MenuState::Closed {
            self.state = MenuState::Open(LanguageList::Collapsed);
        }
    }

    pub fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    pub fn set_open(&mut self, open: bool) {
        if open {
            self.open();
        } else {
            self.close();
        }
    }

    /// Expand or collapse the locale list. Only meaningful while open and
    /// ignored while a locale switch is pending.
    pub fn toggle_languages(&mut self) {
        if self.is_pending() {
            return;
        }
        if let MenuState::Open(list) = self.state {
            self.state = MenuState::Open(list.toggled());
        }
    }

    /// Pick `locale` from the expanded list.
    pub fn select_locale(
        &mut self,
        navigator: &mut impl Navigator,
        locale: Locale,
    ) -> Result<Option<Navigation>, NavigationError> {
        if self.is_pending() || !self.languages_expanded() {
            return Ok(None);
        }

        let navigation = if navigator.locale() == locale {
            None
        } else {
            let path = navigator.pathname().to_string();
            self.transition.start(|| navigator.replace(&path, locale))?
        };

        self.state = if self.config.close_on_locale_select {
            MenuState::Closed
        } else {
            MenuState::Open(LanguageList::Collapsed)
        };
        Ok(navigation)
    }

    /// Activate the link at `index`, closing the panel.
    pub fn follow_link(&mut self, index: usize) -> Option<&NavLink> {
        if index >= self.links.len() {
            return None;
        }
        self.close();
        self.links.get(index)
    }

    /// Flip the theme. The panel stays as it is.
    pub fn toggle_theme(&mut self, store: &mut impl ThemeStore) -> Theme {
        theme::toggle_theme(store)
    }

    pub fn sign_in(&mut self, provider: &mut impl SessionProvider) {
        provider.sign_in(GITHUB_PROVIDER);
        self.close();
    }

    pub fn sign_out(&mut self, provider: &mut impl SessionProvider) {
        provider.sign_out();
        self.close();
    }

    /// Apply `event`. Returns the navigation it started, if any.
    pub fn handle(
        &mut self,
        event: MenuEvent,
        host: &mut impl Host,
    ) -> Result<Option<Navigation>, NavigationError> {
        match event {
            MenuEvent::Open => self.open(),
            MenuEvent::Close => self.close(),
            MenuEvent::ToggleLanguages => self.toggle_languages(),
            MenuEvent::SelectLocale(locale) => return self.select_locale(host, locale),
            MenuEvent::FollowLink(index) => {
                self.follow_link(index);
            }
            MenuEvent::ToggleTheme => {
                self.toggle_theme(host);
            }
            MenuEvent::SignIn => self.sign_in(host),
            MenuEvent::SignOut => self.sign_out(host),
        }
        Ok(None)
    }

    pub fn complete_transition(&mut self) -> Option<Navigation> {
        self.transition.complete()
    }

    /// Render the menu.
    pub fn view(&self, context: MenuContext) -> impl IntoView + use<> {
        view! {
            <MobileMenuView
                state=self.state
                pending=self.is_pending()
                links=self.links.clone()
                context=context
            />
        }
    }
}

const ROW: &str = "hover:bg-accent flex w-full items-center justify-between rounded-lg px-3 py-2.5 text-sm transition-colors";
const LINK_ROW: &str = "hover:bg-accent flex items-center gap-3 rounded-lg px-3 py-2.5 text-sm transition-colors";
const HEADING: &str = "text-textMuted mb-3 text-xs font-semibold tracking-wider uppercase";

/// Menu markup.
///
/// The trigger and every control of the panel are submit buttons of one
/// form carrying `pathname`, `locale` and `state`; the clicked button adds
/// `event`. Link rows post `follow-link` on click without blocking the
/// link's own navigation.
#[component]
pub fn MobileMenuView(
    state: MenuState,
    pending: bool,
    links: Vec<NavLink>,
    context: MenuContext,
) -> impl IntoView {
    let MenuContext {
        route,
        theme,
        session,
        owner,
    } = context;
    let locale = route.locale;
    let t = move |message| i18n::translate(locale, message);
    let account = AccountSection::from_session(session.as_ref());
    let year = Utc::now().year();

    let link_rows = links
        .into_iter()
        .enumerate()
        .map(|(index, link)| {
            let vals = serde_json::json!({ "event": MenuEvent::FollowLink(index).to_string() }).to_string();
            let href = link.href(locale);
            let target = link.is_external().then_some("_blank");
            let rel = link.is_external().then_some("noopener noreferrer");
            view! {
                <li hx-post=MENU_ENDPOINT hx-trigger="click" hx-vals=vals>
                    <a href=href target=target rel=rel class=LINK_ROW>
                        {link.icon.view()}
                        <span>{link.label(locale)}</span>
                    </a>
                </li>
            }
        })
        .collect_view();

    let theme_icon = match theme {
        Theme::Light => view! { <SunIcon /> }.into_any(),
        Theme::Dark => view! { <MoonIcon /> }.into_any(),
    };
    let next_theme_label = t(theme.toggled().message());

    let language_options = state.languages_expanded().then(|| {
        view! {
            <div class="mt-1 ml-7 space-y-1" data-language-options="">
                {locale_options(locale)
                    .into_iter()
                    .map(|option| {
                        let row = if option.active {
                            "flex w-full items-center gap-3 rounded-md px-3 py-2 text-sm bg-accent"
                        } else {
                            "hover:bg-accent flex w-full items-center gap-3 rounded-md px-3 py-2 text-sm"
                        };
                        view! {
                            <button
                                type="submit"
                                name="event"
                                value=MenuEvent::SelectLocale(option.locale).to_string()
                                disabled=pending
                                class=row
                            >
                                <span class="text-lg">{option.flag}</span>
                                <span>{option.label}</span>
                                {option.active.then(|| view! { <span class="ml-auto text-xs">"✓"</span> })}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    let account_view = match account {
        AccountSection::SignedIn { name, email } => view! {
            <div class="space-y-3" data-account="signed-in">
                <div class="px-3 py-2">
                    <p class="text-sm font-medium">{name}</p>
                    <p class="text-textMuted text-xs">{email}</p>
                </div>
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    button_type="submit"
                    name="event"
                    value=MenuEvent::SignOut.to_string()
                    class="w-full"
                >
                    {t(Message::SignOut)}
                </Button>
            </div>
        }
        .into_any(),
        AccountSection::SignedOut => view! {
            <Button
                size=ButtonSize::Sm
                button_type="submit"
                name="event"
                value=MenuEvent::SignIn.to_string()
                class="w-full"
            >
                {t(Message::SignInWithGithub)}
            </Button>
        }
        .into_any(),
    };

    let panel = state.is_open().then(|| {
        view! {
            <div
                role="dialog"
                aria-modal="true"
                class="fixed inset-y-0 right-0 z-50 flex w-full flex-col bg-surface p-0 shadow-lg sm:w-[400px]"
            >
                <div class="flex items-center justify-between p-6 pb-0">
                    <h2 class="text-xl font-bold">{t(Message::Menu)}</h2>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        button_type="submit"
                        name="event"
                        value=MenuEvent::Close.to_string()
                        aria_label=t(Message::CloseMenu)
                    >
                        <XIcon />
                    </Button>
                </div>

                <div class="flex-1 overflow-y-auto">
                    <div class="px-6 py-6">
                        <h3 class=HEADING>{t(Message::Navigation)}</h3>
                        <nav>
                            <ul class="space-y-1">{link_rows}</ul>
                        </nav>
                    </div>

                    <div class="border-t border-panelBorder px-6 py-6">
                        <h3 class=HEADING>{t(Message::Settings)}</h3>

                        <button
                            type="submit"
                            name="event"
                            value=MenuEvent::ToggleTheme.to_string()
                            class=format!("{ROW} mb-2")
                            data-theme-toggle=""
                        >
                            <div class="flex items-center gap-3">
                                {theme_icon}
                                <span>{t(Message::Theme)}</span>
                            </div>
                            <span class="text-textMuted text-xs">{next_theme_label}</span>
                        </button>

                        <div class="space-y-1">
                            <button
                                type="submit"
                                name="event"
                                value=MenuEvent::ToggleLanguages.to_string()
                                disabled=pending
                                aria-expanded=state.languages_expanded().to_string()
                                class=ROW
                            >
                                <div class="flex items-center gap-3">
                                    <GlobeIcon />
                                    <span>{t(Message::Language)}</span>
                                </div>
                                <div class="flex items-center gap-2">
                                    <span class="text-lg">{locale.flag()}</span>
                                    <span class="text-textMuted text-xs">{locale.label()}</span>
                                </div>
                            </button>
                            {language_options}
                        </div>
                    </div>

                    <div class="border-t border-panelBorder px-6 py-6">
                        <h3 class=HEADING>{t(Message::Account)}</h3>
                        {account_view}
                    </div>
                </div>

                <div class="border-t border-panelBorder p-6">
                    <p class="text-textMuted text-center text-xs">
                        {format!("© {year} {owner}")}
                    </p>
                </div>
            </div>
        }
    });

    view! {
        <div id=MENU_ID class="md:hidden">
            <form
                method="post"
                action=MENU_ENDPOINT
                hx-post=MENU_ENDPOINT
                hx-target=format!("#{MENU_ID}")
                hx-swap="outerHTML"
                hx-sync="this:drop"
            >
                <input type="hidden" name="pathname" value=route.path.clone() />
                <input type="hidden" name="locale" value=locale.code() />
                <input type="hidden" name="state" value=state.as_str() />
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    button_type="submit"
                    name="event"
                    value=MenuEvent::Open.to_string()
                    aria_label=t(Message::OpenMenu)
                >
                    <MenuIcon class="h-5 w-5" />
                </Button>
                {panel}
            </form>
        </div>
    }
}
