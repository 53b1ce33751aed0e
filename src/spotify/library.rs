use crate::types::{
    Album, Artist, FollowedArtistsResponse, LikedSongs, Page, PlayHistory, Playlist, SavedAlbum,
    SavedTrack, Session, TopItemType, TopItems,
};

use super::{FetchError, SpotifyClient, pagination};

impl SpotifyClient {
    /// Tracks the user played most recently, newest first.
    ///
    /// # Arguments
    ///
    /// * `session` - Signed-in session (needs `user-read-recently-played`)
    /// * `limit` - Number of entries, 1-50
    pub async fn recently_played(
        &self,
        session: Option<&Session>,
        limit: u32,
    ) -> Result<Page<PlayHistory>, FetchError> {
        let api_url = self.url(&format!(
            "/me/player/recently-played?limit={limit}",
            limit = limit
        ));
        self.get(&api_url, session).await
    }

    /// The user's most listened artists or tracks.
    ///
    /// The response is decoded according to `item_type`, so the returned
    /// [`TopItems`] variant always matches the request.
    ///
    /// # Arguments
    ///
    /// * `session` - Signed-in session (needs `user-top-read`)
    /// * `item_type` - Artists or tracks
    /// * `time_range` - `short_term`, `medium_term` or `long_term`
    /// * `limit` - Number of entries, 1-50
    ///
    /// # API Endpoint
    ///
    /// `GET /me/top/{type}?time_range={time_range}&limit={limit}`
    pub async fn top_items(
        &self,
        session: Option<&Session>,
        item_type: TopItemType,
        time_range: &str,
        limit: u32,
    ) -> Result<TopItems, FetchError> {
        let api_url = self.url(&format!(
            "/me/top/{item_type}?time_range={time_range}&limit={limit}"
        ));
        match item_type {
            TopItemType::Artists => Ok(TopItems::Artists(self.get(&api_url, session).await?)),
            TopItemType::Tracks => Ok(TopItems::Tracks(self.get(&api_url, session).await?)),
        }
    }

    /// First fifty saved albums, unwrapped from their saved-at records.
    pub async fn liked_albums(&self, session: Option<&Session>) -> Result<Vec<Album>, FetchError> {
        let api_url = self.url("/me/albums?market=from_token&limit=50");
        let res: Page<SavedAlbum> = self.get(&api_url, session).await?;
        Ok(res.items.into_iter().map(|saved| saved.album).collect())
    }

    /// Artists the user follows.
    pub async fn liked_artists(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<Artist>, FetchError> {
        let api_url = self.url("/me/following?type=artist&limit=50");
        let res: FollowedArtistsResponse = self.get(&api_url, session).await?;
        Ok(res.artists.items)
    }

    /// Playlists the user owns or follows (first page).
    pub async fn liked_playlists(
        &self,
        session: Option<&Session>,
    ) -> Result<Vec<Playlist>, FetchError> {
        let api_url = self.url("/me/playlists");
        let res: Page<Playlist> = self.get(&api_url, session).await?;
        Ok(res.items)
    }

    /// Every saved track, following the cursor across pages.
    ///
    /// # Returns
    ///
    /// - `Ok(LikedSongs)` - All collected tracks in saved order. `total` is
    ///   the count declared by the first page. When the pagination policy
    ///   stopped early, `next` holds the unread cursor and
    ///   [`LikedSongs::is_complete`] is false
    /// - `Err(FetchError)` - The first page failed, or a later one did under
    ///   [`FailurePolicy::Error`](super::FailurePolicy)
    ///
    /// # Example
    ///
    /// ```
    /// let liked = client.liked_songs(sessions.current()).await?;
    /// if !liked.is_complete() {
    ///     println!("showing {} of {}", liked.items.len(), liked.total);
    /// }
    /// ```
    pub async fn liked_songs(&self, session: Option<&Session>) -> Result<LikedSongs, FetchError> {
        let api_url = self.url("/me/tracks?limit=50");
        let first: Page<SavedTrack> = self.get(&api_url, session).await?;
        let saved = pagination::accumulate(self, session, first, self.pagination()).await?;

        Ok(LikedSongs {
            total: saved.total,
            items: saved.items.into_iter().map(|s| s.track).collect(),
            next: saved.next,
        })
    }
}
