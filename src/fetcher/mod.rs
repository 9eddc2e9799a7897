mod config;

use std::{fs::OpenOptions, io::Write};

pub use config::Config;
use http_body_util::{BodyExt, Empty};
use hyper::{body::Bytes, Request, StatusCode};
use hyper_tls::HttpsConnector;
use hyper_util::{client::legacy::Client, rt::TokioExecutor};

use crate::errors::FetchError;

const API_ENDPOINT_URL: &str = "http://pubproxy.com/api/proxy";

/// Fetches a proxy list from pubproxy.com and persists the raw response.
///
/// The whole pipeline is linear: build the URL from the configuration, issue
/// one GET, check the status, write the body to disk.
pub struct ProxyFetcher {
    config: Config, // Configuration for the single run.
}

impl ProxyFetcher {
    /// Creates a new `ProxyFetcher` from the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config`: The configuration to use for fetching proxies.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Builds the full request URL from the configured query parameters.
    pub fn api_url(&self) -> String {
        let query = self
            .config
            .query_pairs()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", API_ENDPOINT_URL, query)
    }

    /// Performs the single GET against `url` and returns the collected body.
    async fn fetch_url(&self, url: &str) -> Result<Bytes, FetchError> {
        let client =
            Client::builder(TokioExecutor::new()).build::<_, Empty<Bytes>>(HttpsConnector::new());
        let req = Request::get(url)
            .body(Empty::<Bytes>::new())
            .map_err(|e| FetchError::Network(Box::new(e)))?;

        let response = client
            .request(req)
            .await
            .map_err(|e| FetchError::Network(Box::new(e)))?;

        let status = response.status();
        #[cfg(feature = "log")]
        log::debug!("{} responded with {}", url, status);

        match status {
            StatusCode::OK => {}
            StatusCode::SERVICE_UNAVAILABLE => return Err(FetchError::RateLimitExceeded),
            other => {
                return Err(FetchError::RequestFailed {
                    code: other.as_u16(),
                    reason: other.canonical_reason().unwrap_or("Unknown").to_string(),
                })
            }
        }

        let body = response
            .collect()
            .await
            .map_err(|e| FetchError::Network(Box::new(e)))?;
        Ok(body.to_bytes())
    }

    /// Fetches the proxy list from the API endpoint.
    ///
    /// # Returns
    ///
    /// The raw response body on HTTP 200, otherwise the matching `FetchError`.
    pub async fn fetch(&self) -> Result<Bytes, FetchError> {
        let url = self.api_url();
        #[cfg(feature = "log")]
        log::debug!("Requesting {}", url);
        self.fetch_url(&url).await
    }

    /// Writes the response body verbatim to the configured savepath.
    ///
    /// The file is created or truncated and the whole body is written in one
    /// pass; the handle closes when this returns, on success and failure
    /// alike.
    pub fn save(&self, body: &[u8]) -> Result<(), FetchError> {
        let write = || -> std::io::Result<()> {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&self.config.savepath)?;
            file.write_all(body)
        };
        write().map_err(|source| FetchError::FileWrite {
            path: self.config.savepath.clone(),
            source,
        })?;

        #[cfg(feature = "log")]
        log::debug!(
            "Wrote {} bytes to {}",
            body.len(),
            self.config.savepath.display()
        );
        Ok(())
    }

    /// Runs the whole pipeline: one GET, then one file write.
    ///
    /// The savepath is not created or touched unless the fetch succeeded.
    pub async fn run(&self) -> Result<(), FetchError> {
        let body = self.fetch().await?;
        self.save(&body)
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::models::Protocol;

    /// Serves one canned HTTP/1.1 response on a loopback listener and
    /// returns the base URL to reach it.
    async fn canned_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{}/api/proxy", addr)
    }

    #[test]
    fn api_url_joins_pairs_onto_the_endpoint() {
        let mut config = Config::new("out.txt");
        config.limit = 2;
        config.protocol = Some(Protocol::Http);
        let fetcher = ProxyFetcher::new(config);
        assert_eq!(
            fetcher.api_url(),
            "http://pubproxy.com/api/proxy?limit=2&format=txt&type=http"
        );
    }

    #[tokio::test]
    async fn successful_fetch_round_trips_body_to_disk() {
        let url = canned_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 14\r\nConnection: close\r\n\r\nproxy payload\n",
        )
        .await;

        let dir = tempfile::tempdir().unwrap();
        let savepath = dir.path().join("proxies.txt");
        let fetcher = ProxyFetcher::new(Config::new(&savepath));

        let body = fetcher.fetch_url(&url).await.unwrap();
        assert_eq!(&body[..], b"proxy payload\n");

        fetcher.save(&body).unwrap();
        assert_eq!(std::fs::read(&savepath).unwrap(), b"proxy payload\n");
    }

    #[tokio::test]
    async fn status_503_maps_to_rate_limit() {
        let url = canned_server(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let fetcher = ProxyFetcher::new(Config::new("unused.txt"));
        let err = fetcher.fetch_url(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn other_statuses_map_to_request_failed() {
        let url = canned_server(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;

        let fetcher = ProxyFetcher::new(Config::new("unused.txt"));
        match fetcher.fetch_url(&url).await.unwrap_err() {
            FetchError::RequestFailed { code, reason } => {
                assert_eq!(code, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_host_leaves_no_output_file() {
        // Bind and immediately drop a listener so the port is known closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let savepath = dir.path().join("proxies.txt");
        let fetcher = ProxyFetcher::new(Config::new(&savepath));

        let url = format!("http://{}/api/proxy", addr);
        let body = fetcher.fetch_url(&url).await;
        assert!(matches!(body, Err(FetchError::Network(_))));
        assert!(!savepath.exists());
    }
}
