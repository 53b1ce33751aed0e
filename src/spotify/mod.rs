//! # Spotify Integration Module
//!
//! Read-only access to the Spotify Web API plus the PKCE login that produces
//! the [`Session`](crate::types::Session) every call needs.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (presentation, UiStore)
//!          ↓
//! Request functions (browse, catalog, library)
//!          ↓
//! Pagination (cursor following, page ceiling)
//!          ↓
//! SpotifyClient::get_json (bearer auth, status/body checks)
//!          ↓
//! Spotify Web API
//! ```
//!
//! Every remote call passes through [`SpotifyClient::get_json`]. It never
//! retries. Failures come back as a [`FetchError`] whose
//! [`kind`](FetchError::kind) tells callers whether the session was missing,
//! the request failed, the body was empty or could not be decoded.
//!
//! ## Modules
//!
//! - [`auth`] - PKCE authorization, code exchange, session construction
//! - [`browse`] - new releases and categories
//! - [`catalog`] - albums, artists, tracks, playlists, search, recommendations
//! - [`library`] - the signed-in user's saved and followed items
//! - [`pagination`] - bounded accumulation of multi-page collections
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = SpotifyClient::from_config();
//! let session = SessionManager::load().await?;
//!
//! let albums = client.new_releases(session.current()).await?;
//! let liked = client.liked_songs(session.current()).await?;
//! ```

pub mod auth;
pub mod browse;
pub mod catalog;
mod client;
mod error;
pub mod library;
pub mod pagination;

pub use client::SpotifyClient;
pub use error::{ErrorKind, FetchError};
pub use pagination::{Collection, FailurePolicy, PaginationPolicy};
