//! Configuration management for spotdeck.
//!
//! Values are read from environment variables, which may be seeded from a
//! `.env` file in the local data directory. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::spotify::{FailurePolicy, PaginationPolicy};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_COUNTRY: &str = "IN";
pub const DEFAULT_MAX_PAGES: usize = 100;
pub const DEFAULT_SCOPE: &str = "user-read-recently-played user-read-playback-state user-top-read user-read-currently-playing user-follow-read playlist-read-private user-read-email user-read-private user-library-read playlist-read-collaborative";

/// Loads environment variables from `spotdeck/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is not an error;
/// variables already present in the process environment are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotdeck/.env`
/// - macOS: `~/Library/Application Support/spotdeck/.env`
/// - Windows: `%LOCALAPPDATA%/spotdeck/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything spotdeck keeps on disk.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotdeck");
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback server binds to, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// The client ID registered on Spotify's developer platform.
///
/// This is the only value without a default; login cannot proceed without it.
pub fn spotify_client_id() -> Result<String, String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())
}

/// Callback URL Spotify redirects to after authorization. Must match the
/// redirect URI registered for the application.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Market used by the browse endpoints.
pub fn spotify_country() -> String {
    var_or("SPOTIFY_COUNTRY", DEFAULT_COUNTRY)
}

/// Page ceiling and failure policy for paginated collections.
///
/// `SPOTIFY_MAX_PAGES=0` removes the ceiling. `SPOTIFY_PAGINATION_POLICY`
/// accepts `partial` or `error`; anything else falls back to `partial`.
pub fn pagination_policy() -> PaginationPolicy {
    let max_pages = match env::var("SPOTIFY_MAX_PAGES")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
    {
        Some(0) => None,
        Some(n) => Some(n),
        None => Some(DEFAULT_MAX_PAGES),
    };

    let on_failure = match var_or("SPOTIFY_PAGINATION_POLICY", "partial")
        .to_lowercase()
        .as_str()
    {
        "error" => FailurePolicy::Error,
        _ => FailurePolicy::Partial,
    };

    PaginationPolicy {
        max_pages,
        on_failure,
    }
}
