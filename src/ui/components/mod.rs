//! ShadCN-style reusable UI components.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants; doubles as a form submitter
//! - [`Avatar`]: User avatar with initials fallback
//! - [`icons`]: SVG icon components

mod avatar;
mod button;
mod icons;

pub use avatar::{Avatar, initials};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use icons::*;
