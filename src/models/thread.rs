//! Thread and post models for `/[board]/thread/[id].json`.

use std::collections::HashMap;
use std::fmt;

use crate::{
    models::{int_bool, macros::str_opt_ref},
    result::Result,
};
use serde::{Deserialize, Serialize};

/// An ordered collection of [`Post`]s representing a 4chan thread.
///
/// The first post is the opener. The board is not part of the API
/// document; it is attached after decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    posts: Vec<Post>,
    #[serde(skip)]
    board: String,
}

impl Thread {
    /// Decodes a `/[board]/thread/[id].json` document and tags it with `board`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `json` is not a thread document or any
    /// of its posts is malformed.
    ///
    /// [`Error::Decode`]: crate::error::Error::Decode
    pub fn from_json(board: &str, json: &[u8]) -> Result<Self> {
        let mut thread: Thread = serde_json::from_slice(json)?;
        thread.board = board.to_string();
        log::debug!("decoded {} posts from /{}/", thread.posts.len(), board);
        Ok(thread)
    }

    /// Returns the board this thread was fetched from.
    pub fn board(&self) -> &str {
        &self.board
    }

    /// Returns the opening post, if the thread has any posts.
    pub fn op(&self) -> Option<&Post> {
        self.posts.first()
    }

    /// Finds a post by its post number.
    pub fn find(&self, no: u64) -> Option<&Post> {
        self.posts.iter().find(|post| post.no() == no)
    }

    /// Builds a map from a post number to the numbers of the posts replying to it.
    ///
    /// Children keep thread order. The opener is the root and never appears
    /// as a child.
    pub fn reply_index(&self) -> HashMap<u64, Vec<u64>> {
        let mut index: HashMap<u64, Vec<u64>> = HashMap::new();
        for post in self.posts.iter().filter(|post| !post.is_op()) {
            index.entry(post.resto()).or_default().push(post.no());
        }
        index
    }

    /// Returns the CDN URL of a post's attachment, if it has one.
    pub fn file_url(&self, post: &Post) -> Option<String> {
        post.has_file().then(|| {
            format!(
                "https://i.4cdn.org/{}/{}",
                self.board,
                post.full_new_file_name()
            )
        })
    }
}

impl std::ops::Deref for Thread {
    type Target = Vec<Post>;

    fn deref(&self) -> &Self::Target {
        &self.posts
    }
}

#[cfg(feature = "display")]
impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OP ID: {}\nBoard: /{}/\nNumber of Replies: {}",
            self.op().map_or(0, |op| op.no()),
            self.board,
            self.posts.len().saturating_sub(1),
        )
    }
}

/// A single post in a thread.
///
/// Wraps the wire fields in [`Meta`] (reachable through `Deref`) and adds
/// the subject, the comment, and names derived from the attachment fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WirePost", into = "WirePost")]
pub struct Post {
    sub: Option<String>,
    com: Option<String>,
    /// `filename` + `ext`
    full_orig_file_name: String,
    /// `tim` + `ext`, empty when there is no attachment
    full_new_file_name: String,
    has_file: bool,
    meta: Meta,
}

impl Post {
    /// Returns the subject of the post (if provided).
    pub fn sub(&self) -> Option<&str> {
        str_opt_ref!(self.sub)
    }

    /// Returns the comment of the post, in HTML-escaped format (if provided).
    pub fn com(&self) -> Option<&str> {
        str_opt_ref!(self.com)
    }

    /// Returns the uploader's filename joined with the extension.
    pub fn full_orig_file_name(&self) -> &str {
        &self.full_orig_file_name
    }

    /// Returns the server-side filename joined with the extension.
    ///
    /// Empty when the post has no attachment.
    pub fn full_new_file_name(&self) -> &str {
        &self.full_new_file_name
    }

    /// Returns whether the post carries an attachment.
    pub fn has_file(&self) -> bool {
        self.has_file
    }

    /// Returns whether this post opened the thread.
    pub fn is_op(&self) -> bool {
        self.meta.resto == 0
    }

    /// Returns the wire metadata of the post.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }
}

impl std::ops::Deref for Post {
    type Target = Meta;

    fn deref(&self) -> &Self::Target {
        &self.meta
    }
}

/// Metadata of a post as the API sends it.
///
/// Most fields are optional upstream and hold their default when absent.
/// The seven state flags are integers on the wire and booleans here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// The numeric post ID.
    no: u64,

    /// For replies: the post being replied to. For OP posts: this value is 0.
    #[serde(default)]
    resto: u64,

    /// UNIX timestamp (seconds since epoch) the post was created.
    #[serde(default)]
    time: u64,

    /// UNIX timestamp the thread was last modified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<u64>,

    /// Formatted creation time (e.g. `MM/DD/YY(Day)HH:MM`), EST/EDT timezone.
    #[serde(default)]
    now: String,

    /// The poster's ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    /// The capcode (`mod`, `admin`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capcode: Option<String>,

    /// Post numbers referenced as admin replies. Order is kept, nothing else is assumed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    admin: Vec<u64>,

    /// Name the user posted with.
    #[serde(default)]
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    trip: Option<String>,

    /// ISO 3166-1 alpha-2 country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    country_name: Option<String>,

    /// The filename as it appeared on the poster's device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filename: Option<String>,

    /// File extension, dot included (`.jpg`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ext: Option<String>,

    /// Server-assigned filename. 0 when there is no attachment.
    #[serde(default)]
    tim: u64,

    /// Base64-encoded MD5 of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    md5: Option<String>,

    #[serde(default)]
    fsize: u64,

    #[serde(default)]
    h: u32,

    #[serde(default)]
    w: u32,

    #[serde(default)]
    tn_h: u32,

    #[serde(default)]
    tn_w: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_spoiler: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    omitted_posts: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    omitted_images: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    replies: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    images: Option<u32>,

    /// Category of `.swf` uploads on /f/.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,

    /// SEO slug of the thread (OP only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    semantic_url: Option<String>,

    #[serde(default, with = "int_bool")]
    archived: bool,

    #[serde(default, with = "int_bool")]
    bumplimit: bool,

    #[serde(default, with = "int_bool")]
    closed: bool,

    #[serde(default, with = "int_bool")]
    filedeleted: bool,

    #[serde(default, with = "int_bool")]
    imagelimit: bool,

    #[serde(default, with = "int_bool")]
    spoiler: bool,

    #[serde(default, with = "int_bool")]
    sticky: bool,
}

impl Meta {
    /// Returns the numeric post ID.
    pub fn no(&self) -> u64 {
        self.no
    }

    /// Returns the post being replied to (or `0` if the post is OP).
    pub fn resto(&self) -> u64 {
        self.resto
    }

    /// Returns the UNIX timestamp when the post was created.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// Returns the UNIX timestamp the thread was last modified (if present).
    pub fn last_modified(&self) -> Option<u64> {
        self.last_modified
    }

    /// Returns the formatted creation time of the post.
    pub fn now(&self) -> &str {
        &self.now
    }

    /// Returns the poster's ID (if present).
    pub fn id(&self) -> Option<&str> {
        str_opt_ref!(self.id)
    }

    /// Returns the capcode of the post (if present).
    pub fn capcode(&self) -> Option<&str> {
        str_opt_ref!(self.capcode)
    }

    /// Returns the post numbers listed as admin replies.
    pub fn admin(&self) -> &[u64] {
        &self.admin
    }

    /// Returns the name of the user who posted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's tripcode (if present).
    pub fn trip(&self) -> Option<&str> {
        str_opt_ref!(self.trip)
    }

    /// Returns the poster's country code (if present).
    pub fn country(&self) -> Option<&str> {
        str_opt_ref!(self.country)
    }

    /// Returns the poster's country name (if present).
    pub fn country_name(&self) -> Option<&str> {
        str_opt_ref!(self.country_name)
    }

    /// Returns the original filename of the attachment (if present).
    pub fn filename(&self) -> Option<&str> {
        str_opt_ref!(self.filename)
    }

    /// Returns the attachment's extension (if present).
    pub fn ext(&self) -> Option<&str> {
        str_opt_ref!(self.ext)
    }

    /// Returns the server-side filename of the attachment, `0` if none.
    pub fn tim(&self) -> u64 {
        self.tim
    }

    /// Returns the MD5 hash of the attachment (if present).
    pub fn md5(&self) -> Option<&str> {
        str_opt_ref!(self.md5)
    }

    /// Returns the attachment size in bytes.
    pub fn fsize(&self) -> u64 {
        self.fsize
    }

    /// Returns the image height.
    pub fn h(&self) -> u32 {
        self.h
    }

    /// Returns the image width.
    pub fn w(&self) -> u32 {
        self.w
    }

    /// Returns the thumbnail height.
    pub fn tn_h(&self) -> u32 {
        self.tn_h
    }

    /// Returns the thumbnail width.
    pub fn tn_w(&self) -> u32 {
        self.tn_w
    }

    /// Returns the custom spoiler ID (if set).
    pub fn custom_spoiler(&self) -> Option<u32> {
        self.custom_spoiler
    }

    /// Returns the number of posts left out of this document (if present).
    pub fn omitted_posts(&self) -> Option<u32> {
        self.omitted_posts
    }

    /// Returns the number of images left out of this document (if present).
    pub fn omitted_images(&self) -> Option<u32> {
        self.omitted_images
    }

    /// Returns the total number of replies to the thread (if present; OP only).
    pub fn replies(&self) -> Option<u32> {
        self.replies
    }

    /// Returns the total number of image replies to the thread (if present; OP only).
    pub fn images(&self) -> Option<u32> {
        self.images
    }

    /// Returns the `.swf` upload tag (if present).
    pub fn tag(&self) -> Option<&str> {
        str_opt_ref!(self.tag)
    }

    /// Returns the SEO URL slug for a thread (if present; OP only).
    pub fn semantic_url(&self) -> Option<&str> {
        str_opt_ref!(self.semantic_url)
    }

    /// Returns whether the thread is archived.
    pub fn archived(&self) -> bool {
        self.archived
    }

    /// Returns whether the thread has reached the bump limit.
    pub fn bumplimit(&self) -> bool {
        self.bumplimit
    }

    /// Returns whether the thread is closed to replies.
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Returns whether the attachment was deleted.
    pub fn filedeleted(&self) -> bool {
        self.filedeleted
    }

    /// Returns whether the thread has reached the image limit.
    pub fn imagelimit(&self) -> bool {
        self.imagelimit
    }

    /// Returns whether the attachment is marked as a spoiler.
    pub fn spoiler(&self) -> bool {
        self.spoiler
    }

    /// Returns whether the thread is stickied.
    pub fn sticky(&self) -> bool {
        self.sticky
    }
}

/// The shape a post has on the wire. Derived fields are absent.
#[derive(Serialize, Deserialize)]
struct WirePost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    com: Option<String>,
    #[serde(flatten)]
    meta: Meta,
}

#[derive(Debug)]
struct MissingPostNumber;

impl fmt::Display for MissingPostNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("post number is missing or zero")
    }
}

impl TryFrom<WirePost> for Post {
    type Error = MissingPostNumber;

    fn try_from(wire: WirePost) -> std::result::Result<Self, Self::Error> {
        let WirePost { sub, com, meta } = wire;
        if meta.no == 0 {
            return Err(MissingPostNumber);
        }

        let ext = meta.ext.as_deref().unwrap_or_default();
        let full_orig_file_name = format!("{}{ext}", meta.filename.as_deref().unwrap_or_default());
        let (full_new_file_name, has_file) = if meta.tim == 0 {
            (String::new(), false)
        } else {
            (format!("{}{ext}", meta.tim), true)
        };

        Ok(Post {
            sub,
            com,
            full_orig_file_name,
            full_new_file_name,
            has_file,
            meta,
        })
    }
}

impl From<Post> for WirePost {
    fn from(post: Post) -> Self {
        WirePost {
            sub: post.sub,
            com: post.com,
            meta: post.meta,
        }
    }
}
