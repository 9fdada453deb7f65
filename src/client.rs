use crate::{
    error::Error,
    models::thread::Thread,
    result::Result,
    url::extract_board_and_thread_id,
};
use reqwest::{Client as ReqwestClient, StatusCode};

/// Where the client sends its requests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host of the read-only JSON API, without a trailing slash.
    pub api_base: String,
}

impl Config {
    const DEFAULT_API_BASE: &'static str = "https://a.4cdn.org";
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: Self::DEFAULT_API_BASE.to_string(),
        }
    }
}

/// Fetches threads from the API.
///
/// Every call is one independent GET; nothing is cached or retried.
#[derive(Debug)]
pub struct Client {
    http: ReqwestClient,
    cfg: Config,
}

impl Client {
    /// Creates a client for the public API host.
    pub fn new() -> Client {
        Client::with_config(Config::default())
    }

    /// Creates a client that sends its requests to `cfg.api_base`.
    pub fn with_config(cfg: Config) -> Client {
        let http = ReqwestClient::new();
        Client { http, cfg }
    }

    /// Returns the JSON endpoint of a thread.
    pub fn thread_url(&self, board: &str, id: &str) -> String {
        format!("{}/{board}/thread/{id}.json", self.cfg.api_base)
    }

    /// Extracts the board and thread ID from `url` and loads the thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlMatch`] without touching the network if `url` is
    /// not a thread URL, otherwise anything [`Client::thread`] returns.
    pub async fn thread_from_url(&self, url: &str) -> Result<Thread> {
        let (board, id) = extract_board_and_thread_id(url)?;
        self.thread(&board, &id).await
    }

    /// Loads a thread by board and thread ID.
    ///
    /// # Errors
    ///
    /// This function will return an error if the request fails, if the
    /// API answers with anything but `200 OK`, if the body cannot be read,
    /// or if the body is not a thread document.
    pub async fn thread(&self, board: &str, id: &str) -> Result<Thread> {
        let url = self.thread_url(board, id);
        log::info!("request for {} dispatched", url);
        let response = self.http.get(&url).send().await.map_err(Error::Transport)?;

        log::debug!("response status: {}", response.status());
        match response.status() {
            StatusCode::OK => {}
            code => return Err(Error::UnexpectedStatus(code)),
        }

        let body = response.bytes().await.map_err(Error::Read)?;
        Thread::from_json(board, &body)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
