use assetmap_core::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Invalid asset configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    ManifestLoad(#[from] ManifestLoadError),
}
