use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while resolving, fetching, or decoding a thread.
#[derive(Debug, Error)]
pub enum Error {
    /// The input was not a recognized thread URL.
    #[error(transparent)]
    UrlMatch(#[from] UrlMatchError),

    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body could not be read in full.
    #[error("could not read response body: {0}")]
    Read(#[source] reqwest::Error),

    /// The body was not a thread document.
    #[error("could not decode thread: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with something other than `200 OK`.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(StatusCode),
}

/// Board and thread ID could not be extracted from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not extract thread info from {url}")]
pub struct UrlMatchError {
    url: String,
}

impl UrlMatchError {
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Returns the input that failed to match.
    pub fn url(&self) -> &str {
        &self.url
    }
}
