use thiserror::Error;

/// Why a remote call produced no data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no valid session")]
    Unauthenticated,

    #[error("request failed with status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("received empty response from API")]
    EmptyBody,

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request could not be sent: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("response is missing {0}")]
    MissingData(&'static str),

    #[error("collection exceeds the limit of {max_pages} pages")]
    PageLimit { max_pages: usize },

    #[error("failed to fetch page {page}: {source}")]
    Page {
        page: usize,
        #[source]
        source: Box<FetchError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthenticated,
    TransientHttp,
    EmptyBody,
    DecodeError,
    Other,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Unauthenticated => ErrorKind::Unauthenticated,
            FetchError::Status { .. } | FetchError::Transport(_) => ErrorKind::TransientHttp,
            FetchError::EmptyBody => ErrorKind::EmptyBody,
            FetchError::Decode(_) => ErrorKind::DecodeError,
            FetchError::Page { source, .. } => source.kind(),
            FetchError::InvalidUrl(_)
            | FetchError::MissingData(_)
            | FetchError::PageLimit { .. } => ErrorKind::Other,
        }
    }

    /// Transport failures, 429 and 5xx responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Page { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}
