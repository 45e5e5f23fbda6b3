//! Resource fetching
//!
//! webref serves its extracts over https, and test fixtures or local checkouts are read from
//! `file://` URLs. Both go through [`Fetcher`].

use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("webtags/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch {url}: {source}")]
    Http {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a local file URL: {0}")]
    InvalidFileUrl(Url),
    #[error("unsupported URL scheme '{}' in {url}", .url.scheme())]
    UnsupportedScheme { url: Url },
    #[error("failed to decode {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },
}

pub struct Fetcher {
    http: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Fetcher { http })
    }

    /// Raw bytes behind `url`.
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| FetchError::InvalidFileUrl(url.clone()))?;
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| FetchError::Io { path, source })
            }
            "http" | "https" => {
                let http_err = |source| FetchError::Http {
                    url: url.clone(),
                    source,
                };
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(http_err)?;
                let body = response.bytes().await.map_err(http_err)?;
                Ok(body.to_vec())
            }
            _ => Err(FetchError::UnsupportedScheme { url: url.clone() }),
        }
    }

    /// Fetch and decode a JSON document.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, FetchError> {
        debug!(url = %url, "Loading...");
        let data = self.fetch(url).await?;
        debug!(url = %url, length = data.len(), "Parsing data...");
        serde_json::from_slice(&data).map_err(|source| FetchError::Decode {
            url: url.clone(),
            source,
        })
    }
}

/// Accept either a URL or a plain filesystem path for the index location.
pub fn parse_location(raw: &str) -> Result<Url, FetchError> {
    match Url::parse(raw) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = std::env::current_dir()
                .map(|cwd| cwd.join(raw))
                .map_err(|source| FetchError::Io {
                    path: PathBuf::from(raw),
                    source,
                })?;
            Url::from_file_path(&path).map_err(|_| FetchError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not an absolute path"),
            })
        }
        Err(_) => Err(FetchError::Io {
            path: PathBuf::from(raw),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid URL or path"),
        }),
    }
}
