//! Configuration for wiring up asset resolution.
//!
//! The JSON form mirrors the struct layout with camelCase keys:
//!
//! ```json
//! {
//!   "build": { "directory": "public/build", "publicPath": "build" },
//!   "manifest": { "name": "manifest.json", "mapper": "assets-plugin" },
//!   "devServer": { "enabled": true, "url": "http://localhost:8080", "ignoredAssets": ["vendor.js"] }
//! }
//! ```

use assetmap_core::prelude::*;
use assetmap_loader::DevServer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

/// Set to a truthy value to load the manifest eagerly from console processes too.
pub const OPTIMIZE_MANIFEST_ENV: &str = "ASSETMAP_OPTIMIZE_MANIFEST";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetsConfig {
    /// Record every resolution for inspection.
    pub debugger: bool,
    pub dev_server: DevServerConfig,
    pub build: BuildConfig,
    pub manifest: ManifestConfig,
    /// Prefix of the public path, usually the application's base URL path.
    pub base_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevServerConfig {
    pub enabled: bool,
    /// URL used to reach the dev server from this process.
    pub url: Option<String>,
    /// URL the browser uses, if it differs from `url`.
    pub public_url: Option<String>,
    /// Request timeout in seconds. Zero disables the limit.
    pub timeout: f64,
    /// Assets the dev server does not serve. They are resolved as if it was disabled.
    pub ignored_assets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// Directory the bundler writes to.
    pub directory: Option<String>,
    /// Path the build directory is served under.
    pub public_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestConfig {
    /// Manifest file name inside the build directory. Without it names resolve to themselves.
    pub name: Option<String>,
    /// Load the manifest once while building instead of on first use.
    pub optimize: bool,
    pub mapper: MapperKind,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: None,
            public_url: None,
            timeout: assetmap_loader::DEFAULT_TIMEOUT.as_secs_f64(),
            ignored_assets: Vec::new(),
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            name: None,
            optimize: true,
            mapper: MapperKind::default(),
        }
    }
}

impl AssetsConfig {
    /// Defaults depending on how the application runs.
    ///
    /// Debug mode enables the debugger and the dev server. The manifest is optimized outside of
    /// debug mode, except in console processes unless [`OPTIMIZE_MANIFEST_ENV`] is set.
    pub fn defaults(debug_mode: bool, console_mode: bool) -> Self {
        Self {
            debugger: debug_mode,
            dev_server: DevServerConfig {
                enabled: debug_mode,
                ..Default::default()
            },
            manifest: ManifestConfig {
                optimize: !debug_mode && (!console_mode || env_flag(OPTIMIZE_MANIFEST_ENV)),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Reads a JSON config file, filling everything it leaves out (or sets to `null`) from
    /// `defaults`.
    pub fn from_path(path: &Path, defaults: Self) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigurationError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let invalid = |source| ConfigurationError::Invalid {
            path: path.to_path_buf(),
            source,
        };

        let overlay: Value = serde_json::from_str(&content).map_err(invalid)?;
        let mut merged = serde_json::to_value(defaults).map_err(invalid)?;
        merge(&mut merged, overlay);

        serde_json::from_value(merged).map_err(invalid)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if is_blank(&self.build.directory) {
            return Err(ConfigurationError::MissingBuildDirectory);
        }

        if is_blank(&self.build.public_path) {
            return Err(ConfigurationError::MissingPublicPath);
        }

        if self.dev_server.enabled && is_blank(&self.dev_server.url) {
            return Err(ConfigurationError::MissingDevServerUrl);
        }

        let timeout = self.dev_server.timeout;
        if !timeout.is_finite() || timeout < 0.0 {
            return Err(ConfigurationError::InvalidTimeout(timeout));
        }

        Ok(())
    }
}

impl DevServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout).unwrap_or(assetmap_loader::DEFAULT_TIMEOUT)
    }

    pub fn to_dev_server(&self) -> DevServer {
        DevServer::new(self.enabled, self.url.clone().unwrap_or_default())
            .with_public_url(self.public_url.clone())
            .with_timeout(self.timeout())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.is_empty() && value != "0")
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn valid() -> AssetsConfig {
        let mut config = AssetsConfig::default();
        config.build.directory = Some("/var/www/build".into());
        config.build.public_path = Some("build".into());
        config
    }

    #[test]
    fn debug_defaults() {
        let config = AssetsConfig::defaults(true, false);

        assert!(config.debugger);
        assert!(config.dev_server.enabled);
        assert!(!config.manifest.optimize);
        assert!(
            config.dev_server.timeout().abs_diff(Duration::from_millis(100))
                < Duration::from_micros(1)
        );
    }

    #[test]
    fn production_defaults_optimize() {
        let config = AssetsConfig::defaults(false, false);

        assert!(!config.debugger);
        assert!(!config.dev_server.enabled);
        assert!(config.manifest.optimize);
    }

    #[test]
    fn validates_required_settings() {
        assert!(valid().validate().is_ok());

        let mut config = valid();
        config.build.directory = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingBuildDirectory)
        ));

        let mut config = valid();
        config.build.public_path = Some(" ".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingPublicPath)
        ));

        let mut config = valid();
        config.dev_server.enabled = true;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::MissingDevServerUrl)
        ));

        let mut config = valid();
        config.dev_server.timeout = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("assets.json");
        fs::write(
            &path,
            r#"{
                "build": { "directory": "public/build", "publicPath": "build" },
                "manifest": { "name": "manifest.json", "mapper": "chunk-names", "optimize": null },
                "devServer": { "url": "http://localhost:8080", "ignoredAssets": ["vendor.js"] }
            }"#,
        )
        .unwrap();

        let config = AssetsConfig::from_path(&path, AssetsConfig::defaults(true, false)).unwrap();

        assert!(config.debugger);
        assert!(config.dev_server.enabled);
        assert!(!config.manifest.optimize);
        assert_eq!(config.manifest.name.as_deref(), Some("manifest.json"));
        assert_eq!(config.manifest.mapper, MapperKind::ChunkNames);
        assert_eq!(config.dev_server.ignored_assets, vec!["vendor.js"]);
        assert_eq!(config.build.public_path.as_deref(), Some("build"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reports_unreadable_and_invalid_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            AssetsConfig::from_path(&missing, AssetsConfig::default()),
            Err(ConfigurationError::Unreadable { .. })
        ));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{ "manifest": { "mapper": "rollup" } }"#).unwrap();
        let err = AssetsConfig::from_path(&invalid, AssetsConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigurationError::Invalid { .. }));
        assert!(err.to_string().contains("invalid.json"));
    }
}
