use crate::fetch::{error_chain, http_client};

use std::sync::OnceLock;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

/// A webpack-style dev server serving hot-reloaded assets.
#[derive(Debug)]
pub struct DevServer {
    enabled: bool,
    url: String,
    public_url: Option<String>,
    timeout: Duration,
    available: OnceLock<bool>,
}

impl DevServer {
    pub fn new(enabled: bool, url: impl Into<String>) -> Self {
        Self {
            enabled,
            url: url.into(),
            public_url: None,
            timeout: DEFAULT_TIMEOUT,
            available: OnceLock::new(),
        }
    }

    /// A dev server that is never used.
    pub fn disabled() -> Self {
        Self::new(false, "")
    }

    /// URL the browser should use, when it differs from the one used for probing and
    /// manifest fetches (e.g. behind a proxy or inside a container).
    pub fn with_public_url(mut self, public_url: Option<String>) -> Self {
        self.public_url = public_url.filter(|url| !url.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn url(&self) -> &str {
        self.public_url.as_deref().unwrap_or(&self.url)
    }

    pub fn internal_url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the dev server is enabled and answers requests.
    ///
    /// The first call probes the internal URL once; the answer is kept for the lifetime of
    /// this instance. Any HTTP response counts, even an error status.
    pub fn is_available(&self) -> bool {
        if !self.enabled {
            return false;
        }

        *self.available.get_or_init(|| self.probe())
    }

    fn probe(&self) -> bool {
        let result =
            http_client(self.timeout, true).and_then(|client| client.get(&self.url).send());

        match result {
            Ok(response) => {
                debug!("Dev server at {} answered with {}", self.url, response.status());
                true
            }
            Err(e) => {
                warn!(
                    "Dev server at {} is not available, falling back to the build directory: {}",
                    self.url,
                    error_chain(&e)
                );
                false
            }
        }
    }
}

impl Default for DevServer {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_server_is_never_available() {
        let server = DevServer::new(false, "http://127.0.0.1:1");
        assert!(!server.is_available());
        assert!(server.available.get().is_none());
    }

    #[test]
    fn public_url_falls_back_to_internal_url() {
        let server = DevServer::new(true, "http://webpack:8080");
        assert_eq!(server.url(), "http://webpack:8080");

        let server = server.with_public_url(Some("https://localhost:8080".to_string()));
        assert_eq!(server.url(), "https://localhost:8080");
        assert_eq!(server.internal_url(), "http://webpack:8080");

        let server =
            DevServer::new(true, "http://webpack:8080").with_public_url(Some(String::new()));
        assert_eq!(server.url(), "http://webpack:8080");
    }

    #[test]
    fn defaults_to_short_timeout() {
        assert_eq!(DevServer::disabled().timeout(), Duration::from_millis(100));
    }
}
