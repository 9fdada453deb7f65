//! Resolves human-facing thread URLs into the board and thread ID the API expects.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::UrlMatchError;

// The host must be `<sub>.4<anything>.org`, which covers boards.4chan.org,
// boards.4channel.org and the a.4cdn.org API host.
static THREAD_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^./]+\.4[^./]*\.org/([^/]+)/thread/([0-9]+)(?:[/#].*)?$")
        .expect("thread url pattern is valid")
});

/// Extracts the board and thread ID from a thread URL.
///
/// Both parts are returned as they appear in the URL. A trailing slug
/// (`/cats`) or fragment (`#p51971506`) is accepted and ignored.
///
/// ```rust
/// let (board, id) = chanthread::extract_board_and_thread_id(
///     "https://boards.4chan.org/wsg/thread/921167/cats",
/// )
/// .unwrap();
/// assert_eq!((board.as_str(), id.as_str()), ("wsg", "921167"));
/// ```
///
/// # Errors
///
/// Returns an [`UrlMatchError`] carrying `url` if it is not a thread URL.
pub fn extract_board_and_thread_id(url: &str) -> Result<(String, String), UrlMatchError> {
    let caps = THREAD_URL
        .captures(url)
        .ok_or_else(|| UrlMatchError::new(url))?;

    match (caps.get(1), caps.get(2)) {
        (Some(board), Some(id)) => Ok((board.as_str().to_owned(), id.as_str().to_owned())),
        _ => Err(UrlMatchError::new(url)),
    }
}
