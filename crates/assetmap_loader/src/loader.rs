use crate::directory::BuildDirectoryProvider;
use crate::fetch::fetch;

use assetmap_core::prelude::*;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Loads a bundler manifest from the build directory (or the dev server) and normalizes it
/// with a [`ManifestMapper`].
///
/// Every call to [`load_manifest`](Self::load_manifest) reads the source again; caching is up
/// to the caller.
pub struct ManifestLoader {
    directory_provider: BuildDirectoryProvider,
    mapper: Box<dyn ManifestMapper>,
}

impl ManifestLoader {
    pub fn new(directory_provider: BuildDirectoryProvider) -> Self {
        Self::with_mapper(directory_provider, IdentityMapper)
    }

    pub fn with_mapper(
        directory_provider: BuildDirectoryProvider,
        mapper: impl ManifestMapper,
    ) -> Self {
        Self::from_boxed(directory_provider, Box::new(mapper))
    }

    /// Like [`with_mapper`](Self::with_mapper), for mappers picked at runtime.
    pub fn from_boxed(
        directory_provider: BuildDirectoryProvider,
        mapper: Box<dyn ManifestMapper>,
    ) -> Self {
        Self {
            directory_provider,
            mapper,
        }
    }

    pub fn load_manifest(&self, file_name: &str) -> Result<Manifest, ManifestLoadError> {
        let path = self.manifest_path(file_name);
        let bytes = fetch(&path, self.timeout(), self.accepts_invalid_certs())?;

        let raw: Value =
            serde_json::from_slice(&bytes).map_err(|source| ManifestLoadError::Parse {
                path: path.clone(),
                source,
            })?;

        let manifest = self
            .mapper
            .map(raw)
            .map_err(|source| ManifestLoadError::Mapping {
                path: path.clone(),
                source,
            })?;

        debug!("Loaded {} manifest entries from {path}", manifest.len());
        Ok(manifest)
    }

    pub fn manifest_path(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.directory_provider.build_directory())
    }

    /// Certificate checks are skipped only while the dev server is enabled.
    pub fn accepts_invalid_certs(&self) -> bool {
        self.directory_provider.dev_server().is_enabled()
    }

    pub fn directory_provider(&self) -> &BuildDirectoryProvider {
        &self.directory_provider
    }

    fn timeout(&self) -> Duration {
        self.directory_provider.dev_server().timeout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn loader_for(dir: &std::path::Path) -> ManifestLoader {
        ManifestLoader::new(BuildDirectoryProvider::local(dir.to_string_lossy()))
    }

    #[test]
    fn loads_and_maps_manifest() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("manifest.json"),
            r#"{"main.js": "/build/main.abc123.js", "main.css": "/build/main.abc123.css"}"#,
        )
        .unwrap();

        let manifest = loader_for(dir.path()).load_manifest("manifest.json").unwrap();

        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get("main.js"), Some("/build/main.abc123.js"));
    }

    #[test]
    fn manifest_path_joins_directory() {
        let loader = ManifestLoader::new(BuildDirectoryProvider::local("/var/www/build"));
        assert_eq!(
            loader.manifest_path("manifest.json"),
            "/var/www/build/manifest.json"
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempdir().unwrap();
        let loader = loader_for(dir.path());
        let expected_path = loader.manifest_path("missing.json");

        let err = loader.load_manifest("missing.json").unwrap_err();

        assert!(matches!(err, ManifestLoadError::Read { .. }));
        assert_eq!(err.path(), expected_path);
        assert!(err.to_string().contains(&expected_path));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("manifest.json"), "not json").unwrap();

        let err = loader_for(dir.path())
            .load_manifest("manifest.json")
            .unwrap_err();

        assert!(matches!(err, ManifestLoadError::Parse { .. }));
        assert!(err.to_string().contains("manifest.json"));
    }

    #[test]
    fn mapper_rejection_is_wrapped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("stats.json"), r#"{"main.js": "/main.js"}"#).unwrap();

        let loader = ManifestLoader::with_mapper(
            BuildDirectoryProvider::local(dir.path().to_string_lossy()),
            ChunkNameMapper,
        );
        let err = loader.load_manifest("stats.json").unwrap_err();

        assert!(matches!(
            err,
            ManifestLoadError::Mapping {
                source: MapperError::UnexpectedShape { .. },
                ..
            }
        ));
    }

    #[test]
    fn boxed_mapper_is_used_as_is() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("stats.json"),
            r#"{"assetsByChunkName": {"main": ["main.abc.js", "main.abc.css"]}}"#,
        )
        .unwrap();

        let loader = ManifestLoader::from_boxed(
            BuildDirectoryProvider::local(dir.path().to_string_lossy()),
            MapperKind::ChunkNames.into_mapper(),
        );
        let manifest = loader.load_manifest("stats.json").unwrap();

        assert_eq!(manifest.get("main.js"), Some("main.abc.js"));
        assert_eq!(manifest.get("main.css"), Some("main.abc.css"));
    }

    #[test]
    fn verifies_certificates_outside_dev_mode() {
        let loader = ManifestLoader::new(BuildDirectoryProvider::local("/build"));
        assert!(!loader.accepts_invalid_certs());
    }
}
