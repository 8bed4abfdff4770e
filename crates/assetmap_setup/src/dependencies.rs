use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// A file the built resolver depends on, e.g. an eagerly loaded manifest.
///
/// Long-running processes can poll [`is_stale`](Self::is_stale) and rebuild when it turns true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDependency {
    path: String,
    /// SHA256 of the content at registration time. `None` for remote or unreadable paths.
    digest: Option<String>,
}

impl BuildDependency {
    pub fn capture(path: impl Into<String>) -> Self {
        let path = path.into();
        let digest = digest_file(&path);
        debug!("Registered build dependency {path} ({digest:?})");

        Self { path, digest }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Whether the file changed, appeared or disappeared since it was captured.
    pub fn is_stale(&self) -> bool {
        digest_file(&self.path) != self.digest
    }
}

fn digest_file(path: &str) -> Option<String> {
    if path.starts_with("http://") || path.starts_with("https://") {
        return None;
    }

    let data = std::fs::read(path).ok()?;
    Some(hex::encode(Sha256::digest(&data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn detects_changed_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, r#"{"main.js": "/build/main.1.js"}"#).unwrap();

        let dependency = BuildDependency::capture(path.to_string_lossy());
        assert_eq!(dependency.digest().map(str::len), Some(64));
        assert!(!dependency.is_stale());

        fs::write(&path, r#"{"main.js": "/build/main.2.js"}"#).unwrap();
        assert!(dependency.is_stale());
    }

    #[test]
    fn detects_removed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{}").unwrap();

        let dependency = BuildDependency::capture(path.to_string_lossy());
        fs::remove_file(&path).unwrap();

        assert!(dependency.is_stale());
    }

    #[test]
    fn remote_paths_are_never_stale() {
        let dependency = BuildDependency::capture("http://localhost:8080/manifest.json");
        assert!(dependency.digest().is_none());
        assert!(!dependency.is_stale());
    }
}
