use crate::loader::ManifestLoader;

use assetmap_core::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};

/// Manifest-backed resolver that loads the manifest on first use.
///
/// The loaded manifest is kept until the resolver is dropped. Failed loads are not cached.
/// Concurrent first calls may each load the manifest; whichever finishes last wins.
pub struct ManifestAssetNameResolver {
    file_name: String,
    loader: ManifestLoader,
    cache: RwLock<Option<Arc<Manifest>>>,
}

impl ManifestAssetNameResolver {
    pub fn new(file_name: impl Into<String>, loader: ManifestLoader) -> Self {
        Self {
            file_name: file_name.into(),
            loader,
            cache: RwLock::new(None),
        }
    }

    pub fn manifest(&self) -> Result<Arc<Manifest>, ManifestLoadError> {
        if let Some(manifest) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(manifest.clone());
        }

        let manifest = Arc::new(self.loader.load_manifest(&self.file_name)?);
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(manifest.clone());

        Ok(manifest)
    }

    pub fn manifest_path(&self) -> String {
        self.loader.manifest_path(&self.file_name)
    }
}

impl AssetNameResolver for ManifestAssetNameResolver {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        self.manifest()?
            .get(asset_name)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::AssetNotFound(asset_name.to_string()))
    }
}
