use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use tabled::Tabled;

/// Spotify sends `null` where it means an empty list (e.g. a playlist without
/// a cover), so missing and null arrays both decode as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes a nested object, turning anything that does not fit `T` into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Token response of the authorization code exchange.
///
/// Only what a session needs is kept; sessions are never refreshed, so the
/// refresh token and granted scope are not read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// An authenticated user's bearer token together with its expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    /// Seconds since the unix epoch.
    pub expires_at: i64,
}

impl Session {
    /// A session is usable only while `now` is strictly before `expires_at`.
    pub fn is_valid_at(&self, now: i64) -> bool {
        now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(chrono::Utc::now().timestamp())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub height: Option<u32>,
    pub url: String,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

/// One page of a remote collection with the cursor to the following page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
            next: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icons: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artists: Vec<Artist>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    pub album_type: Option<String>,
    #[serde(default)]
    pub release_date: String,
    pub tracks: Option<Page<Track>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    pub followers: Option<Followers>,
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub album: Option<Box<Album>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub duration_ms: u64,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    #[serde(default)]
    pub added_at: String,
    /// `None` for removed tracks and for entries that are not catalog tracks,
    /// such as local files which carry no Spotify ids.
    #[serde(default, deserialize_with = "lenient")]
    pub track: Option<Track>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub followers: Option<Followers>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    pub owner: PlaylistOwner,
    #[serde(default)]
    pub tracks: Page<PlaylistItem>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    #[serde(default)]
    pub added_at: String,
    pub track: Track,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAlbum {
    #[serde(default)]
    pub added_at: String,
    pub album: Album,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayHistory {
    pub played_at: String,
    pub track: Track,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedSongs {
    pub total: u64,
    pub items: Vec<Track>,
    /// Cursor of the first page that was not read; `None` when every saved
    /// track is in `items`.
    pub next: Option<String>,
}

impl LikedSongs {
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub albums: Option<Page<Album>>,
    pub artists: Option<Page<Artist>>,
    pub playlists: Option<Page<Option<Playlist>>>,
    pub tracks: Option<Page<Track>>,
}

/// Audio features of a single track, used as recommendation targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAnalysis {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub key: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub mode: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub valence: f64,
}

impl TrackAnalysis {
    /// Feature names paired with their values, in declaration order.
    pub fn features(&self) -> [(&'static str, f64); 11] {
        [
            ("acousticness", self.acousticness),
            ("danceability", self.danceability),
            ("energy", self.energy),
            ("instrumentalness", self.instrumentalness),
            ("key", self.key),
            ("liveness", self.liveness),
            ("loudness", self.loudness),
            ("mode", self.mode),
            ("speechiness", self.speechiness),
            ("tempo", self.tempo),
            ("valence", self.valence),
        ]
    }
}

/// Every part of an artist's page; each slot fails independently.
#[derive(Debug, Clone, Default)]
pub struct ArtistDiscography {
    pub artist: Option<Artist>,
    pub top_tracks: Option<Vec<Track>>,
    pub albums: Option<Page<Album>>,
    pub singles: Option<Page<Album>>,
    pub appears_on: Option<Page<Album>>,
    pub compilations: Option<Page<Album>>,
    pub related_artists: Option<Vec<Artist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumsContainer {
    pub albums: Page<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesContainer {
    pub categories: Page<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistsContainer {
    pub playlists: Page<Option<Playlist>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: Page<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsResponse {
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    All,
    Artist,
    Album,
    Track,
    Playlist,
}

impl SearchType {
    /// Value of the `type` query parameter.
    pub fn as_query(&self) -> &'static str {
        match self {
            SearchType::All => "album,artist,track,playlist",
            SearchType::Artist => "artist",
            SearchType::Album => "album",
            SearchType::Track => "track",
            SearchType::Playlist => "playlist",
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(SearchType::All),
            "artist" | "artists" => Ok(SearchType::Artist),
            "album" | "albums" => Ok(SearchType::Album),
            "track" | "tracks" | "song" | "songs" => Ok(SearchType::Track),
            "playlist" | "playlists" => Ok(SearchType::Playlist),
            other => Err(format!(
                "invalid search type '{}'. Allowed: all, artist, album, track, playlist",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopItemType {
    Artists,
    Tracks,
}

impl fmt::Display for TopItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopItemType::Artists => write!(f, "artists"),
            TopItemType::Tracks => write!(f, "tracks"),
        }
    }
}

impl FromStr for TopItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "artists" | "artist" => Ok(TopItemType::Artists),
            "tracks" | "track" => Ok(TopItemType::Tracks),
            other => Err(format!(
                "invalid item type '{}'. Allowed: artists, tracks",
                other
            )),
        }
    }
}

/// Result of `/me/top/{type}`; the path decides the item shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TopItems {
    Artists(Page<Artist>),
    Tracks(Page<Track>),
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub date: String,
    pub name: String,
    pub artists: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub genres: String,
    pub followers: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: u64,
}

#[derive(Tabled)]
pub struct CategoryTableRow {
    pub id: String,
    pub name: String,
}
