//! # assetmap loader
//!
//! Reads bundler manifests from a build directory or a running dev server.
//!
//! ## Usage
//!
//! ```no_run
//! use assetmap_loader::{BuildDirectoryProvider, ManifestLoader};
//!
//! let loader = ManifestLoader::new(BuildDirectoryProvider::local("./public/build"));
//! let manifest = loader.load_manifest("manifest.json")?;
//! # Ok::<(), assetmap_core::error::ManifestLoadError>(())
//! ```
//!
//! Requests to the dev server skip TLS certificate verification, since dev servers usually
//! present a self-signed certificate. Manifests read from anywhere else are always verified.

mod dev_server;
mod directory;
mod fetch;
mod lazy;
mod loader;

pub use dev_server::{DEFAULT_TIMEOUT, DevServer};
pub use directory::BuildDirectoryProvider;
pub use lazy::ManifestAssetNameResolver;
pub use loader::ManifestLoader;
