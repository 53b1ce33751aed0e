use reqwest::Url;

use crate::types::{
    Album, Artist, ArtistDiscography, ArtistsResponse, Page, Playlist, RecommendationsResponse,
    SearchResults, SearchType, Session, TopTracksResponse, Track, TrackAnalysis,
};

use super::{FetchError, SpotifyClient, pagination};

impl SpotifyClient {
    /// Fetches an album with its first page of tracks.
    ///
    /// # Arguments
    ///
    /// * `session` - Signed-in session
    /// * `album_id` - Spotify ID of the album
    ///
    /// # Returns
    ///
    /// - `Ok(Album)` - The album; `tracks` holds the first page only
    /// - `Err(FetchError)` - Unauthenticated, HTTP, empty or undecodable
    ///   response
    pub async fn album_by_id(
        &self,
        session: Option<&Session>,
        album_id: &str,
    ) -> Result<Album, FetchError> {
        let api_url = self.url(&format!("/albums/{id}", id = album_id));
        self.get(&api_url, session).await
    }

    /// Fetches an artist's profile (name, images, followers, genres).
    pub async fn artist_by_id(
        &self,
        session: Option<&Session>,
        artist_id: &str,
    ) -> Result<Artist, FetchError> {
        let api_url = self.url(&format!("/artists/{id}", id = artist_id));
        self.get(&api_url, session).await
    }

    /// Fetches a track with its album and artists.
    pub async fn track_by_id(
        &self,
        session: Option<&Session>,
        track_id: &str,
    ) -> Result<Track, FetchError> {
        let api_url = self.url(&format!("/tracks/{id}", id = track_id));
        self.get(&api_url, session).await
    }

    /// Audio features of a track.
    pub async fn track_analysis(
        &self,
        session: Option<&Session>,
        track_id: &str,
    ) -> Result<TrackAnalysis, FetchError> {
        let api_url = self.url(&format!("/audio-features/{id}", id = track_id));
        self.get(&api_url, session).await
    }

    /// Fetches every part of an artist page concurrently.
    ///
    /// A failed request leaves its slot empty; the other slots are unaffected.
    pub async fn artist_discography(
        &self,
        session: Option<&Session>,
        artist_id: &str,
    ) -> ArtistDiscography {
        let base = self.url(&format!("/artists/{id}", id = artist_id));
        let albums_url = |group: &str| format!("{base}/albums?include_groups={group}");

        let artist_url = base.clone();
        let top_tracks_url = format!("{base}/top-tracks?market=from_token");
        let album_url = albums_url("album");
        let single_url = albums_url("single");
        let appears_on_url = albums_url("appears_on");
        let compilation_url = albums_url("compilation");
        let related_url = format!("{base}/related-artists");

        let (artist, top_tracks, albums, singles, appears_on, compilations, related) = tokio::join!(
            self.get::<Artist>(&artist_url, session),
            self.get::<TopTracksResponse>(&top_tracks_url, session),
            self.get::<Page<Album>>(&album_url, session),
            self.get::<Page<Album>>(&single_url, session),
            self.get::<Page<Album>>(&appears_on_url, session),
            self.get::<Page<Album>>(&compilation_url, session),
            self.get::<ArtistsResponse>(&related_url, session),
        );

        ArtistDiscography {
            artist: artist.ok(),
            top_tracks: top_tracks.ok().map(|r| r.tracks),
            albums: albums.ok(),
            singles: singles.ok(),
            appears_on: appears_on.ok(),
            compilations: compilations.ok(),
            related_artists: related.ok().map(|r| r.artists),
        }
    }

    /// Fetches a playlist together with every page of its tracks.
    ///
    /// The playlist object carries the first page of tracks; the remaining
    /// pages are followed with [`pagination::accumulate`] under the client's
    /// [`PaginationPolicy`](super::PaginationPolicy).
    ///
    /// # Returns
    ///
    /// - `Ok(Playlist)` - `tracks.items` holds everything collected.
    ///   `tracks.next` is `None` when the whole playlist was read and keeps
    ///   the unread cursor when a partial result was returned
    /// - `Err(FetchError)` - The playlist itself could not be fetched, or a
    ///   later page failed under [`FailurePolicy::Error`](super::FailurePolicy)
    ///
    /// # Entries
    ///
    /// Items whose track is removed or is a local file have `track: None`;
    /// they still count towards `tracks.total`.
    pub async fn playlist_by_id(
        &self,
        session: Option<&Session>,
        playlist_id: &str,
    ) -> Result<Playlist, FetchError> {
        let api_url = self.url(&format!("/playlists/{id}", id = playlist_id));
        let mut playlist: Playlist = self.get(&api_url, session).await?;

        let first = std::mem::take(&mut playlist.tracks);
        let tracks = pagination::accumulate(self, session, first, self.pagination()).await?;
        playlist.tracks = tracks.into_page();

        Ok(playlist)
    }

    /// Searches the catalog.
    ///
    /// The query is URL-encoded and sent with `market=from_token`, so results
    /// follow the signed-in user's country.
    ///
    /// # Arguments
    ///
    /// * `session` - Signed-in session
    /// * `search_type` - Which result kinds to ask for; [`SearchType::All`]
    ///   requests albums, artists, playlists and tracks at once
    /// * `query` - Free-text search terms
    /// * `limit` - Results per kind
    ///
    /// # Returns
    ///
    /// - `Ok(SearchResults)` - One optional page per requested kind
    /// - `Err(FetchError)` - [`FetchError::InvalidUrl`] if the base URL cannot
    ///   be parsed, otherwise any fetch failure
    ///
    /// # Example
    ///
    /// ```
    /// let results = client
    ///     .search(sessions.current(), SearchType::Track, "daft punk", 5)
    ///     .await?;
    /// if let Some(tracks) = results.tracks {
    ///     println!("{} matching tracks", tracks.total);
    /// }
    /// ```
    pub async fn search(
        &self,
        session: Option<&Session>,
        search_type: SearchType,
        query: &str,
        limit: u32,
    ) -> Result<SearchResults, FetchError> {
        let limit = limit.to_string();
        let api_url = Url::parse_with_params(
            &self.url("/search"),
            &[
                ("q", query),
                ("market", "from_token"),
                ("type", search_type.as_query()),
                ("limit", limit.as_str()),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        self.get(api_url.as_str(), session).await
    }

    /// Builds the recommendation query seeded by an artist and a track, with
    /// each audio feature as a `target_` parameter.
    pub fn recommendations_url(
        &self,
        artist_id: &str,
        track_id: &str,
        analysis: &TrackAnalysis,
    ) -> String {
        let mut endpoint = self.url(&format!(
            "/recommendations?limit=30&seed_artists={artist_id}&seed_tracks={track_id}"
        ));
        for (feature, value) in analysis.features() {
            endpoint.push_str(&format!("&target_{feature}={value}"));
        }
        endpoint
    }

    /// Thirty tracks similar to `track_id`.
    ///
    /// Runs analysis, track and artist lookups in sequence; the first failure
    /// ends the chain.
    pub async fn track_recommendations(
        &self,
        session: Option<&Session>,
        track_id: &str,
    ) -> Result<Vec<Track>, FetchError> {
        let analysis = self.track_analysis(session, track_id).await?;
        let track = self.track_by_id(session, track_id).await?;
        let primary = track
            .artists
            .first()
            .ok_or(FetchError::MissingData("a primary artist"))?;
        let artist = self.artist_by_id(session, &primary.id).await?;

        let endpoint = self.recommendations_url(&artist.id, track_id, &analysis);
        let res: RecommendationsResponse = self.get(&endpoint, session).await?;
        Ok(res.tracks)
    }
}
