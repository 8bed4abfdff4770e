//! # assetmap setup
//!
//! Builds the asset name resolver an application uses from an [`AssetsConfig`].
//!
//! | manifest | optimize | dev server | resolver |
//! |----------|----------|------------|----------|
//! | -        | -        | off        | identity |
//! | set      | no       | off        | manifest, loaded on first use |
//! | set      | yes      | off        | static, loaded by [`AssetsBuilder::build`] |
//! | any      | any      | on         | dev server, ignored assets use one of the above |
//!
//! ```no_run
//! use assetmap_setup::prelude::*;
//! use std::path::Path;
//!
//! let defaults = AssetsConfig::defaults(false, false);
//! let config = AssetsConfig::from_path(Path::new("assets.json"), defaults)?;
//! let assets = AssetsBuilder::new(config).build()?;
//! let url = assets.locator().locate_in_public_path("main.js")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod config;
mod dependencies;
mod error;
mod locator;

pub use builder::{Assets, AssetsBuilder, FallbackKind, ResolverKind, SharedResolver};
pub use config::{
    AssetsConfig, BuildConfig, DevServerConfig, ManifestConfig, OPTIMIZE_MANIFEST_ENV,
};
pub use dependencies::BuildDependency;
pub use error::SetupError;
pub use locator::{AssetLocator, PublicPathProvider};

pub mod prelude {
    pub use crate::{Assets, AssetsBuilder, AssetsConfig, BuildDependency, SetupError};
}
