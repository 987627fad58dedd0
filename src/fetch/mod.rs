use std::{
    fmt::{self, Display, Formatter},
    future::Future,
    path::PathBuf,
    time::Duration,
};

use reqwest::{Client, StatusCode};
use tracing::{instrument, Level};
use url::Url;

/// Where a source page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Remote(Url),
    Local(PathBuf),
}

impl Locator {
    /// `http(s)` URLs are fetched over the network, anything else is a file path.
    pub fn parse(s: &str) -> Self {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::Local(PathBuf::from(s)),
        }
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Request(reqwest::Error),
    Status(StatusCode),
    Io(std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Request(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(e) => write!(f, "HTTP Request Error: {e}"),
            Self::Status(status) => write!(f, "HTTP Request Error: status {status}"),
            Self::Io(e) => write!(f, "IO Error: {e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Loads the raw page of a source.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, locator: &Locator) -> impl Future<Output = Result<String, Error>> + Send;
}

/// Reads URLs with reqwest and paths from the file system.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().gzip(true).timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(skip(self, locator), fields(locator = %locator), level = Level::TRACE)]
    async fn fetch(&self, locator: &Locator) -> Result<String, Error> {
        let start = std::time::Instant::now();
        let text = match locator {
            Locator::Remote(url) => {
                let response = self.client.get(url.clone()).send().await?;
                if response.status() != StatusCode::OK {
                    return Err(Error::Status(response.status()));
                }
                response.text().await?
            }
            Locator::Local(path) => tokio::fs::read_to_string(path).await?,
        };
        log::trace!("Got {locator} in \t {:?}", start.elapsed());
        Ok(text)
    }
}
