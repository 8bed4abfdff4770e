use crate::error::*;
use crate::manifest::Manifest;

use serde_json::Value;
use std::sync::Arc;

/// Normalizes the raw JSON a bundler writes into a flat [`Manifest`].
///
/// Implementations must be pure: the same input always maps to the same manifest.
pub trait ManifestMapper: Send + Sync + 'static {
    fn map(&self, raw: Value) -> Result<Manifest, MapperError>;
}

/// Turns a logical asset name into the path or URL that should be served.
///
/// Anything with this capability can back a template helper or a debug panel.
pub trait AssetNameResolver: Send + Sync {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError>;
}

impl<R: AssetNameResolver + ?Sized> AssetNameResolver for Box<R> {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        (**self).resolve(asset_name)
    }
}

impl<R: AssetNameResolver + ?Sized> AssetNameResolver for Arc<R> {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        (**self).resolve(asset_name)
    }
}

impl<M: ManifestMapper + ?Sized> ManifestMapper for Box<M> {
    fn map(&self, raw: Value) -> Result<Manifest, MapperError> {
        (**self).map(raw)
    }
}
