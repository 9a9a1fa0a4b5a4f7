//! UI components and layouts.
//!
//! Components are Leptos views rendered on the server. Interactive state
//! (menu open, language list expanded) lives in plain Rust structs whose
//! transitions are driven by events the browser posts back through HTMX;
//! the structs then render themselves for the next response.
//!
//! # Structure
//!
//! - [`lang_switcher`]: compact locale dropdown
//! - [`mobile_menu`]: slide-out panel with links, settings and account
//! - [`nav_links`]: the static navigation link list
//! - [`shell`]: page document, header, footer and pages
//! - [`components`]: reusable ShadCN-style UI components

pub mod components;
pub mod lang_switcher;
pub mod mobile_menu;
pub mod nav_links;
pub mod shell;

use leptos::prelude::*;

use crate::navigation::Navigator;
use crate::session::SessionProvider;
use crate::theme::ThemeStore;

pub use lang_switcher::LangSwitcher;
pub use mobile_menu::{MenuEvent, MenuState, MobileMenu};
pub use nav_links::NavLink;

/// Everything a component may call out to while handling an event.
pub trait Host: Navigator + ThemeStore + SessionProvider {}

impl<T> Host for T where T: Navigator + ThemeStore + SessionProvider {}

/// Render a view to an HTML string under a fresh reactive owner.
pub fn render_to_html<F, V>(view: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new_root(None);
    owner.with(|| view().to_html())
}
