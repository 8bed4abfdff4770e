use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestLoadError {
    #[error("Manifest file '{path}' could not be loaded: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Manifest file '{path}' could not be loaded: {reason}")]
    Fetch { path: String, reason: String },

    #[error("Manifest file '{path}' is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest file '{path}' has an unexpected shape: {source}")]
    Mapping {
        path: String,
        #[source]
        source: MapperError,
    },
}

impl ManifestLoadError {
    /// The resolved path or URL the loader attempted to read.
    pub fn path(&self) -> &str {
        match self {
            Self::Read { path, .. }
            | Self::Fetch { path, .. }
            | Self::Parse { path, .. }
            | Self::Mapping { path, .. } => path,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapperError {
    #[error("expected {expected} at '{pointer}'")]
    UnexpectedShape {
        pointer: String,
        expected: &'static str,
    },

    #[error("Mapper error: {0}")]
    Generic(String),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Asset '{0}' was not found in the manifest")]
    AssetNotFound(String),

    #[error(transparent)]
    ManifestLoad(#[from] ManifestLoadError),
}

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("You need to specify the build directory.")]
    MissingBuildDirectory,

    #[error("You need to specify the build public path.")]
    MissingPublicPath,

    #[error("You need to specify the dev server URL.")]
    MissingDevServerUrl,

    #[error("Dev server timeout must be a finite, non-negative number of seconds, got {0}")]
    InvalidTimeout(f64),

    #[error("Configuration file '{}' could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file '{}' is invalid: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
