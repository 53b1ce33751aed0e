use tokio::sync::watch;

use crate::types::Track;

/// Presentation state: the current search query and the selected track.
///
/// Each field is backed by a watch channel, so views can subscribe and react
/// to changes. Construct one per UI and pass it where it is needed.
#[derive(Debug)]
pub struct UiStore {
    search_query: watch::Sender<String>,
    current_track: watch::Sender<Option<Track>>,
}

impl UiStore {
    pub fn new() -> Self {
        Self {
            search_query: watch::Sender::new(String::new()),
            current_track: watch::Sender::new(None),
        }
    }

    pub fn search_query(&self) -> String {
        self.search_query.borrow().clone()
    }

    pub fn set_search_query(&self, val: impl Into<String>) {
        self.search_query.send_replace(val.into());
    }

    pub fn current_track(&self) -> Option<Track> {
        self.current_track.borrow().clone()
    }

    pub fn set_current_track(&self, track: Track) {
        self.current_track.send_replace(Some(track));
    }

    pub fn subscribe_search_query(&self) -> watch::Receiver<String> {
        self.search_query.subscribe()
    }

    pub fn subscribe_current_track(&self) -> watch::Receiver<Option<Track>> {
        self.current_track.subscribe()
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}
