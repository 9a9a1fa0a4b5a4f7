//! Locale Switcher: globe button with a dropdown of supported locales.
//!
//! Picking a locale other than the current one replaces the route with the
//! same path under the new locale. The switch runs inside a [`Transition`];
//! while it is pending the trigger and every option are disabled.

use leptos::prelude::*;

use crate::i18n::{self, Locale, Message};
use crate::navigation::{Navigation, NavigationError, Navigator, Route, Transition};
use crate::ui::components::{Button, ButtonSize, ButtonVariant, GlobeIcon};

/// Endpoint the dropdown posts selections to.
pub const LOCALE_ENDPOINT: &str = "/ui/locale";

/// One entry of a locale picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleOption {
    pub locale: Locale,
    pub label: &'static str,
    pub flag: &'static str,
    /// Whether this is the current locale.
    pub active: bool,
}

/// Picker entries in registry order, marking `current` as active.
pub fn locale_options(current: Locale) -> Vec<LocaleOption> {
    i18n::LOCALES
        .iter()
        .map(|(locale, info)| LocaleOption {
            locale: *locale,
            label: info.label,
            flag: info.flag,
            active: *locale == current,
        })
        .collect()
}

#[derive(Debug, Default)]
pub struct LangSwitcher {
    open: bool,
    transition: Transition,
}

impl LangSwitcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the dropdown is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a locale switch is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.transition.is_pending()
    }

    /// Activate the trigger. Ignored while a switch is pending.
    pub fn toggle(&mut self) {
        if self.is_pending() {
            return;
        }
        self.open = !self.open;
    }

    #[must_use]
    pub fn options(&self, current: Locale) -> Vec<LocaleOption> {
        locale_options(current)
    }

    /// Select `locale`.
    ///
    /// Returns the navigation that was started, or `None` when the locale is
    /// already current or another switch is still pending.
    pub fn select(
        &mut self,
        navigator: &mut impl Navigator,
        locale: Locale,
    ) -> Result<Option<Navigation>, NavigationError> {
        if self.is_pending() {
            tracing::debug!(name: "locale.switch.ignored", target_locale = %locale, "Locale switch already pending");
            return Ok(None);
        }

        self.open = false;
        if navigator.locale() == locale {
            return Ok(None);
        }

        let path = navigator.pathname().to_string();
        let navigation = self
            .transition
            .start(|| navigator.replace(&path, locale))?;

        if let Some(navigation) = &navigation {
            tracing::info!(
                name: "locale.switch",
                from = %navigation.from.locale,
                to = %navigation.to.locale,
                path = %navigation.to.path,
                "Locale switch started"
            );
        }
        Ok(navigation)
    }

    /// Mark the pending switch as rendered, re-enabling the control.
    pub fn complete_transition(&mut self) -> Option<Navigation> {
        self.transition.complete()
    }

    /// Render the switcher for `route`.
    pub fn view(&self, route: &Route) -> impl IntoView + use<> {
        view! {
            <LangSwitcherView route=route.clone() open=self.open pending=self.is_pending() />
        }
    }
}

/// Locale dropdown markup.
///
/// Every option is a submit button of one form; `hx-sync="this:drop"` and
/// `hx-disabled-elt` keep the browser from posting a second switch while one
/// is in flight.
#[component]
pub fn LangSwitcherView(route: Route, open: bool, pending: bool) -> impl IntoView {
    let locale = route.locale;
    let options = locale_options(locale);
    let alpine_state = format!("{{ open: {open} }}");

    view! {
        <div class="relative" data-lang-switcher="" x-data=alpine_state x-on:click.outside="open = false">
            <span x-on:click="open = !open">
                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Icon
                    disabled=pending
                    aria_label=i18n::translate(locale, Message::ChangeLanguage)
                >
                    <GlobeIcon />
                </Button>
            </span>
            <form
                method="post"
                action=LOCALE_ENDPOINT
                hx-post=LOCALE_ENDPOINT
                hx-sync="this:drop"
                hx-disabled-elt="find button"
                role="menu"
                x-show="open"
                class="absolute right-0 z-50 mt-2 min-w-40 rounded-md border border-panelBorder bg-surface p-1 shadow-md"
            >
                <input type="hidden" name="pathname" value=route.path.clone() />
                <input type="hidden" name="current" value=locale.code() />
                {options
                    .into_iter()
                    .map(|option| {
                        let row = if option.active {
                            "flex w-full cursor-pointer items-center rounded-sm px-2 py-1.5 text-sm bg-accent"
                        } else {
                            "flex w-full cursor-pointer items-center rounded-sm px-2 py-1.5 text-sm hover:bg-accent"
                        };
                        let aria_current = option.active.then_some("true");
                        view! {
                            <button
                                type="submit"
                                role="menuitem"
                                name="locale"
                                value=option.locale.code()
                                disabled=pending
                                aria-current=aria_current
                                class=row
                            >
                                <span class="mr-2 text-lg">{option.flag}</span>
                                <span>{option.label}</span>
                                {option.active.then(|| view! { <span class="ml-auto text-xs">"✓"</span> })}
                            </button>
                        }
                    })
                    .collect_view()}
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::testing::RecordingHost;
    use crate::ui::render_to_html;

    #[test]
    fn test_select_other_locale_navigates_once() {
        for target in Locale::all().filter(|l| *l != Locale::En) {
            let mut host = RecordingHost::at(Locale::En, "/docs");
            let mut switcher = LangSwitcher::new();

            let navigation = switcher.select(&mut host, target).unwrap().unwrap();

            assert_eq!(host.navigations.len(), 1);
            assert_eq!(navigation.to.locale, target);
            assert_eq!(navigation.to.path, "/docs");
            assert!(navigation.is_locale_switch());
        }
    }

    #[test]
    fn test_select_current_locale_is_noop() {
        let mut host = RecordingHost::at(Locale::De, "/");
        let mut switcher = LangSwitcher::new();

        assert!(switcher.select(&mut host, Locale::De).unwrap().is_none());
        assert!(switcher.select(&mut host, Locale::De).unwrap().is_none());
        assert!(host.navigations.is_empty());
        assert!(!switcher.is_pending());
    }

    #[test]
    fn test_pending_switch_blocks_further_selection() {
        let mut host = RecordingHost::at(Locale::En, "/");
        let mut switcher = LangSwitcher::new();

        switcher.select(&mut host, Locale::Pl).unwrap();
        assert!(switcher.is_pending());

        assert!(switcher.select(&mut host, Locale::Fr).unwrap().is_none());
        switcher.toggle();
        assert!(!switcher.is_open());
        assert_eq!(host.navigations.len(), 1);

        let done = switcher.complete_transition().unwrap();
        assert_eq!(done.to.locale, Locale::Pl);
        assert!(switcher.select(&mut host, Locale::Fr).unwrap().is_some());
        assert_eq!(host.navigations.len(), 2);
    }

    #[test]
    fn test_selection_closes_dropdown() {
        let mut host = RecordingHost::at(Locale::En, "/");
        let mut switcher = LangSwitcher::new();

        switcher.toggle();
        assert!(switcher.is_open());
        switcher.select(&mut host, Locale::En).unwrap();
        assert!(!switcher.is_open());
    }

    #[test]
    fn test_navigation_errors_propagate() {
        struct Broken;

        impl Navigator for Broken {
            fn pathname(&self) -> &str {
                "/"
            }

            fn locale(&self) -> Locale {
                Locale::En
            }

            fn replace(&mut self, path: &str, _locale: Locale) -> Result<Navigation, NavigationError> {
                Err(NavigationError::MissingLocale(path.to_string()))
            }
        }

        let mut switcher = LangSwitcher::new();
        assert!(switcher.select(&mut Broken, Locale::Pl).is_err());
        assert!(!switcher.is_pending());
    }

    #[test]
    fn test_options_follow_registry_order() {
        for current in Locale::all() {
            let options = LangSwitcher::new().options(current);
            let codes: Vec<_> = options.iter().map(|o| o.locale.code()).collect();
            assert_eq!(codes, vec!["en", "pl", "de", "fr"]);
            assert_eq!(options.iter().filter(|o| o.active).count(), 1);
        }
    }

    #[test]
    fn test_render_lists_locales_in_order_and_marks_active() {
        let route = Route::new(Locale::Fr, "/").unwrap();
        let switcher = LangSwitcher::new();
        let html = render_to_html(|| switcher.view(&route));

        let positions: Vec<usize> = ["English", "Polski", "Deutsch", "Français"]
            .iter()
            .map(|label| html.find(label).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(html.matches('✓').count(), 1);
        assert!(html.contains("Changer de langue"));
        assert!(html.contains(r#"name="current" value="fr""#));
    }

    #[test]
    fn test_render_disables_controls_while_pending() {
        let route = Route::new(Locale::En, "/").unwrap();
        let mut host = RecordingHost::at(Locale::En, "/");
        let mut switcher = LangSwitcher::new();
        switcher.select(&mut host, Locale::Pl).unwrap();

        let idle = render_to_html(|| LangSwitcher::new().view(&route));
        let pending = render_to_html(|| switcher.view(&route));

        // One trigger plus four options.
        let count = |html: &str| html.matches("disabled").count();
        assert_eq!(count(&pending) - count(&idle), 5);
    }
}
