//! # API Module
//!
//! HTTP endpoints served by the local callback server while a login is in
//! progress.
//!
//! - [`callback`] - Receives the authorization code from Spotify's accounts
//!   service and exchanges it, together with the PKCE verifier, for a token.
//! - [`health`] - Reports status and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotdeck::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
