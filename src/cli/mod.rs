//! # CLI Module
//!
//! User-facing commands. This is the presentation layer: it owns the
//! [`UiStore`], takes the session from the [`SessionManager`], calls the
//! data-access layer and renders results as tables.
//!
//! ## Command Categories
//!
//! - [`auth`], [`whoami`] - sign in and show the signed-in user
//! - [`releases`], [`categories`] - browse
//! - [`search`] - search the catalog
//! - [`playlist`], [`album`], [`artist`], [`track`] - single items
//! - [`recent`], [`top`], [`library`] - the user's own data
//!
//! ## Error Presentation
//!
//! The data-access layer reports failures as [`FetchError`]. Here they are
//! collapsed by [`present`]: a warning is printed and the command shows no
//! data. Only missing configuration or a failed login is fatal.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    management::{SessionManager, UiStore},
    spotify::{ErrorKind, FetchError, SpotifyClient},
    types::Session,
    warning,
};

mod auth;
mod browse;
mod catalog;
mod library;
mod playlist;
mod search;

pub use auth::{auth, whoami};
pub use browse::{categories, releases};
pub use catalog::{album, artist, track};
pub use library::{LibraryKind, library, recent, top};
pub use playlist::playlist;
pub use search::search;

/// Everything a command needs, built once in `main`.
pub struct Context {
    pub client: SpotifyClient,
    pub sessions: Option<SessionManager>,
    pub store: UiStore,
}

impl Context {
    pub fn new(client: SpotifyClient, sessions: Option<SessionManager>, store: UiStore) -> Self {
        Self {
            client,
            sessions,
            store,
        }
    }

    /// Loads configuration and the stored session, if any.
    pub async fn load() -> Self {
        let sessions = SessionManager::load().await.ok();
        Self::new(SpotifyClient::from_config(), sessions, UiStore::new())
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.as_ref().and_then(|s| s.current())
    }
}

/// Turns a failed request into "no data" after telling the user why.
pub fn present<T>(result: Result<T, FetchError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.kind() == ErrorKind::Unauthenticated => {
            warning!(
                "Cannot load {}: not signed in or session expired. Run spotdeck auth.",
                what
            );
            None
        }
        Err(e) => {
            warning!("Cannot load {}. Err: {}", what, e);
            None
        }
    }
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
