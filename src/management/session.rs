use std::path::PathBuf;

use chrono::Utc;

use crate::{config, types::Session};

/// Keeps the signed-in session on disk and hands it out while it is valid.
pub struct SessionManager {
    path: PathBuf,
    session: Option<Session>,
}

impl SessionManager {
    /// Wraps a freshly created session, stored at the default location
    /// (`<data dir>/cache/session.json`). Nothing is written until
    /// [`persist`](Self::persist) is called.
    pub fn new(session: Session) -> Self {
        Self {
            path: Self::session_path(),
            session: Some(session),
        }
    }

    /// Same as [`new`](Self::new) but stored at `path`.
    pub fn with_path(path: impl Into<PathBuf>, session: Option<Session>) -> Self {
        Self {
            path: path.into(),
            session,
        }
    }

    /// Loads the session stored at the default location.
    ///
    /// # Returns
    ///
    /// - `Ok(SessionManager)` - The stored session, which may already be
    ///   expired; use [`current`](Self::current) to get a usable one
    /// - `Err(String)` - The file is missing or is not a session
    ///
    /// # Example
    ///
    /// ```
    /// let sessions = SessionManager::load().await?;
    /// match sessions.current() {
    ///     Some(session) => println!("Signed in as {}", session.name),
    ///     None => println!("Session expired, run `spotdeck auth`"),
    /// }
    /// ```
    pub async fn load() -> Result<Self, String> {
        Self::load_from(Self::session_path()).await
    }

    /// Same as [`load`](Self::load) but reads `path`.
    pub async fn load_from(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let session: Session = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            path,
            session: Some(session),
        })
    }

    /// Writes the session as pretty JSON, creating parent directories as
    /// needed.
    ///
    /// # Error Handling
    ///
    /// - Fails with `"no session to persist"` after [`clear`](Self::clear)
    /// - Directory creation and write errors are returned as strings
    pub async fn persist(&self) -> Result<(), String> {
        let Some(session) = &self.session else {
            return Err("no session to persist".to_string());
        };

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Removes the stored session file.
    pub async fn clear(&mut self) -> Result<(), String> {
        self.session = None;
        async_fs::remove_file(&self.path)
            .await
            .map_err(|e| e.to_string())
    }

    /// The session if it is still valid now.
    pub fn current(&self) -> Option<&Session> {
        self.current_at(Utc::now().timestamp())
    }

    /// The session if it is valid at `now`; a session expiring exactly at
    /// `now` is already gone.
    pub fn current_at(&self, now: i64) -> Option<&Session> {
        self.session.as_ref().filter(|s| s.is_valid_at(now))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn session_path() -> PathBuf {
        config::data_dir().join("cache/session.json")
    }
}
