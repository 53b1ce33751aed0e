use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Artist, SearchType, Track, TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Formats a duration in milliseconds as `M:SS`.
pub fn fmt_mss(duration_ms: u64) -> String {
    let total_seconds = duration_ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Greeting for the given hour of the day (0-23).
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Morning",
        12..=16 => "Afternoon",
        _ => "Evening",
    }
}

pub struct SearchFilterTag {
    pub link: &'static str,
    pub label: &'static str,
    pub search_type: SearchType,
}

pub const SEARCH_FILTER_TAGS: [SearchFilterTag; 5] = [
    SearchFilterTag {
        link: "",
        label: "All",
        search_type: SearchType::All,
    },
    SearchFilterTag {
        link: "/tracks",
        label: "Songs",
        search_type: SearchType::Track,
    },
    SearchFilterTag {
        link: "/albums",
        label: "Albums",
        search_type: SearchType::Album,
    },
    SearchFilterTag {
        link: "/artists",
        label: "Artists",
        search_type: SearchType::Artist,
    },
    SearchFilterTag {
        link: "/playlists",
        label: "Playlists",
        search_type: SearchType::Playlist,
    },
];

pub fn search_filter_label(search_type: SearchType) -> &'static str {
    SEARCH_FILTER_TAGS
        .iter()
        .find(|tag| tag.search_type == search_type)
        .map_or("All", |tag| tag.label)
}

pub fn artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn track_row(track: &Track) -> TrackTableRow {
    TrackTableRow {
        name: track.name.clone(),
        artists: artist_names(&track.artists),
        album: track
            .album
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_default(),
        duration: fmt_mss(track.duration_ms),
    }
}
