//! Authenticated sessions.
//!
//! A [`Session`] describes a signed-in user. The UI only ever reads an
//! `Option<&Session>`: `None` means nobody is signed in. Signing in and out is
//! delegated to a [`SessionProvider`].
//!
//! # Architecture
//!
//! - [`Session`]: an authenticated user record
//! - [`SessionStore`]: thread-safe store of live sessions, keyed by token
//! - [`SessionProvider`]: sign-in/sign-out capability used by the UI
//!
//! # Example
//!
//! ```rust
//! use starter_shell::session::{SessionStore, SessionUser};
//!
//! let store = SessionStore::new();
//! let session = store.create(SessionUser {
//!     name: Some("Octo Cat".into()),
//!     email: Some("octo@example.com".into()),
//!     image: None,
//! });
//!
//! assert!(store.get(session.id()).is_some());
//! store.remove(session.id());
//! assert!(store.is_empty());
//! ```

mod store;

pub use store::{Session, SessionStore, SessionUser};

/// Name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Identifier of the GitHub sign-in provider.
pub const GITHUB_PROVIDER: &str = "github";

/// Sign-in/sign-out capability.
///
/// Both calls are fire-and-forget from the caller's point of view: failures
/// are surfaced by the provider, never by the UI that triggered them.
pub trait SessionProvider {
    /// Begin the sign-in flow for `provider`.
    fn sign_in(&mut self, provider: &str);

    /// End the current session.
    fn sign_out(&mut self);
}
