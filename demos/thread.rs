//! Fetches a thread from a URL and prints every post with its attachment.
//!
//! Usage: `cargo run --example thread -- <thread url>`

use chanthread::Client;
use log::LevelFilter;

/// Type alias for simplifying error handling
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    // This is just for seeing the logs
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()?;

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://boards.4chan.org/po/thread/570368".to_string());

    let client = Client::new();
    let thread = client.thread_from_url(&url).await?;

    for post in thread.iter() {
        let comment = post.com().unwrap_or_default().replace("<br>", "\n");
        println!("No.{} ({}): {comment}", post.no(), post.now());
        if let Some(file) = thread.file_url(post) {
            println!("    file: {file} ({})", post.full_orig_file_name());
        }
    }

    Ok(())
}
