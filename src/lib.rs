#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::missing_panics_doc)]
//! # chanthread
//!
//! chanthread fetches a single thread from an imageboard's read-only JSON API
//! and decodes it into typed [`Post`]s.
//!
//! - Thread URLs (`https://boards.4chan.org/<board>/thread/<id>[/slug][#frag]`)
//!   are resolved into a board and thread ID.
//! - The integer flags of the API (`sticky`, `closed`, ...) are exposed as
//!   booleans, and attachment names are derived while decoding.
//!
//! ## Example: Printing the comment from a thread.
//!
//! ```rust,no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use chanthread::thread::Post;
//! use chanthread::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new();
//!     let thread = client
//!         .thread_from_url("https://boards.4chan.org/po/thread/570368")
//!         .await?;
//!
//!     // print thread's OP comment
//!     let comment = thread.op().and_then(Post::com).unwrap_or_default();
//!     let comment = comment.replace("<br>", "\n"); // replace line breaks
//!     println!("op says: {comment}");
//!     Ok(())
//! }
//! ```
//!
//! [`Post`]: crate::models::thread::Post

/// Client module contains [`Client`] for fetching threads.
pub mod client;

/// Contains [`Error`]s that can be thrown by the libary.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub(crate) mod models;

pub(crate) mod result;

/// Thread URL parsing.
pub mod url;

pub use client::{Client, Config};
pub use error::{Error, UrlMatchError};
pub use models::*;
pub use url::extract_board_and_thread_id;
