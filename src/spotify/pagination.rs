use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    config,
    types::{Page, Session},
};

use super::{FetchError, SpotifyClient};

/// What to do when a follow-up page cannot be fetched or the ceiling is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop and hand back everything collected so far.
    Partial,
    /// Fail the whole operation.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPolicy {
    /// Maximum number of pages including the first; `None` is unbounded.
    pub max_pages: Option<usize>,
    pub on_failure: FailurePolicy,
}

impl Default for PaginationPolicy {
    fn default() -> Self {
        Self {
            max_pages: Some(config::DEFAULT_MAX_PAGES),
            on_failure: FailurePolicy::Partial,
        }
    }
}

/// A fully materialised collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    /// Total declared by the first page.
    pub total: u64,
    pub items: Vec<T>,
    /// Cursor the loop stopped at; `None` once every page has been read.
    pub next: Option<String>,
}

impl<T> Collection<T> {
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    pub fn into_page(self) -> Page<T> {
        Page {
            total: self.total,
            items: self.items,
            next: self.next,
        }
    }
}

/// Follows `first.next` until it is null, appending every page's items.
///
/// Pages are fetched one at a time in cursor order.
pub async fn accumulate<T: DeserializeOwned>(
    client: &SpotifyClient,
    session: Option<&Session>,
    first: Page<T>,
    policy: &PaginationPolicy,
) -> Result<Collection<T>, FetchError> {
    let mut collection = Collection {
        total: first.total,
        items: first.items,
        next: first.next,
    };
    let mut pages = 1;

    while let Some(url) = collection.next.clone() {
        if let Some(max_pages) = policy.max_pages.filter(|&max| pages >= max) {
            match policy.on_failure {
                FailurePolicy::Partial => {
                    warn!(max_pages, "page limit reached, returning partial collection");
                    return Ok(collection);
                }
                FailurePolicy::Error => return Err(FetchError::PageLimit { max_pages }),
            }
        }

        pages += 1;
        debug!(page = pages, url = %url, "fetching next page");

        let page: Page<T> = match client.get(&url, session).await {
            Ok(page) => page,
            Err(e) => match policy.on_failure {
                FailurePolicy::Partial => {
                    warn!(page = pages, error = %e, "page fetch failed, returning partial collection");
                    return Ok(collection);
                }
                FailurePolicy::Error => {
                    return Err(FetchError::Page {
                        page: pages,
                        source: Box::new(e),
                    });
                }
            },
        };

        collection.items.extend(page.items);
        collection.next = page.next;
    }

    Ok(collection)
}
