use assetmap_core::prelude::*;
use bytes::Bytes;
use reqwest::blocking::Client;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, warn};

pub(crate) fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

/// Builds the blocking client used for every dev server request.
///
/// A zero timeout disables the limit.
pub(crate) fn http_client(
    timeout: Duration,
    accept_invalid_certs: bool,
) -> reqwest::Result<Client> {
    if accept_invalid_certs {
        // webpack-dev-server ships a self-signed certificate
        warn!("TLS certificate verification is disabled for dev server requests");
    }

    Client::builder()
        .timeout((!timeout.is_zero()).then_some(timeout))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
}

/// Reads the manifest bytes from disk or over HTTP(S). Never retries.
pub(crate) fn fetch(
    path: &str,
    timeout: Duration,
    accept_invalid_certs: bool,
) -> Result<Bytes, ManifestLoadError> {
    if is_remote(path) {
        debug!("Fetching manifest from {path}");
        fetch_remote(path, timeout, accept_invalid_certs).inspect_err(|e| error!("{e}"))
    } else {
        debug!("Reading manifest from {path}");
        std::fs::read(path)
            .map(Bytes::from)
            .map_err(|source| ManifestLoadError::Read {
                path: path.to_string(),
                source,
            })
    }
}

fn fetch_remote(
    url: &str,
    timeout: Duration,
    accept_invalid_certs: bool,
) -> Result<Bytes, ManifestLoadError> {
    let fetch_error = |reason: String| ManifestLoadError::Fetch {
        path: url.to_string(),
        reason,
    };

    let client = http_client(timeout, accept_invalid_certs)
        .map_err(|e| fetch_error(format!("HTTP client unavailable: {}", error_chain(&e))))?;
    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_error(error_chain(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_error(format!("server returned {status}")));
    }

    response.bytes().map_err(|e| fetch_error(error_chain(&e)))
}

/// Renders an error with all of its sources, e.g.
/// `error sending request: operation timed out`.
pub(crate) fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn detects_remote_paths() {
        assert!(is_remote("http://localhost:8080/manifest.json"));
        assert!(is_remote("https://localhost:8080/manifest.json"));
        assert!(!is_remote("/var/www/build/manifest.json"));
        assert!(!is_remote("build/http://manifest.json"));
    }

    #[test]
    fn reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"a":"/x"}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let bytes = fetch(&path, Duration::from_millis(100), false).unwrap();
        assert_eq!(&bytes[..], br#"{"a":"/x"}"#);
    }

    #[test]
    fn chains_error_sources() {
        let err = ManifestLoadError::Read {
            path: "/nope".to_string(),
            source: std::io::Error::other("disk on fire"),
        };
        let message = error_chain(&err);

        assert!(message.contains("/nope"));
        assert_eq!(message.matches("disk on fire").count(), 1);
    }
}
