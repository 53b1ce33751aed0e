use crate::types::{
    Album, AlbumsContainer, CategoriesContainer, Category, Playlist, PlaylistsContainer, Session,
};

use super::{FetchError, SpotifyClient};

impl SpotifyClient {
    /// Retrieves the fifteen newest album releases in the client's market.
    ///
    /// # Arguments
    ///
    /// * `session` - Signed-in session; without one nothing is requested
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Album>)` - The `albums.items` of the response, possibly empty
    /// - `Err(FetchError)` - Any failure of [`SpotifyClient::get_json`] or a
    ///   body without an `albums` page
    ///
    /// # API Endpoint
    ///
    /// `GET /browse/new-releases?country={country}&limit=15`
    ///
    /// # Example
    ///
    /// ```
    /// let albums = client.new_releases(sessions.current()).await?;
    /// for album in albums {
    ///     println!("{} ({})", album.name, album.release_date);
    /// }
    /// ```
    pub async fn new_releases(&self, session: Option<&Session>) -> Result<Vec<Album>, FetchError> {
        let api_url = self.url(&format!(
            "/browse/new-releases?country={country}&limit=15",
            country = self.country()
        ));
        let res: AlbumsContainer = self.get(&api_url, session).await?;
        Ok(res.albums.items)
    }

    /// Lists up to fifty browse categories for the client's market.
    ///
    /// # API Endpoint
    ///
    /// `GET /browse/categories?limit=50&country={country}`
    pub async fn categories(&self, session: Option<&Session>) -> Result<Vec<Category>, FetchError> {
        let api_url = self.url(&format!(
            "/browse/categories?limit=50&country={country}",
            country = self.country()
        ));
        let res: CategoriesContainer = self.get(&api_url, session).await?;
        Ok(res.categories.items)
    }

    /// Fetches a single browse category.
    pub async fn category_by_id(
        &self,
        session: Option<&Session>,
        category_id: &str,
    ) -> Result<Category, FetchError> {
        let api_url = self.url(&format!("/browse/categories/{id}", id = category_id));
        self.get(&api_url, session).await
    }

    /// Playlists filed under a category. Null entries in the response are dropped.
    pub async fn playlists_by_category(
        &self,
        session: Option<&Session>,
        category_id: &str,
    ) -> Result<Vec<Playlist>, FetchError> {
        let api_url = self.url(&format!(
            "/browse/categories/{id}/playlists?country={country}&limit=50",
            id = category_id,
            country = self.country()
        ));
        let res: PlaylistsContainer = self.get(&api_url, session).await?;
        Ok(res.playlists.items.into_iter().flatten().collect())
    }
}
