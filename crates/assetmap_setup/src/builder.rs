use crate::config::AssetsConfig;
use crate::dependencies::BuildDependency;
use crate::error::SetupError;
use crate::locator::{AssetLocator, PublicPathProvider};

use assetmap_core::prelude::*;
use assetmap_loader::{BuildDirectoryProvider, DevServer, ManifestAssetNameResolver, ManifestLoader};
use std::fmt;
use std::sync::Arc;
use tracing::info;

pub type SharedResolver = Arc<dyn AssetNameResolver>;

/// Which resolver [`AssetsBuilder`] picked for the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverKind {
    /// No manifest configured.
    Identity,
    /// Manifest loaded on first use.
    Manifest,
    /// Manifest loaded while building.
    Static,
    /// Dev server, falling back to the given kind for ignored assets.
    DevServer(FallbackKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    Identity,
    Manifest,
    Static,
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Manifest => write!(f, "manifest"),
            Self::Static => write!(f, "static"),
            Self::DevServer(fallback) => write!(f, "dev server (fallback: {fallback:?})"),
        }
    }
}

/// The builder for asset resolution.
///
/// Picks the resolver from the configuration, loads the manifest up front when optimizing and
/// wraps everything in the debug resolver when the debugger is on.
pub struct AssetsBuilder {
    config: AssetsConfig,
    mapper: Option<Box<dyn ManifestMapper>>,
}

impl AssetsBuilder {
    pub fn new(config: AssetsConfig) -> Self {
        Self {
            config,
            mapper: None,
        }
    }

    /// Use a custom mapper instead of the one named in the configuration.
    pub fn with_mapper(mut self, mapper: impl ManifestMapper) -> Self {
        self.mapper = Some(Box::new(mapper));
        self
    }

    pub fn build(self) -> Result<Assets, SetupError> {
        let AssetsBuilder { config, mapper } = self;
        config.validate()?;

        let AssetsConfig {
            debugger,
            dev_server: dev_config,
            build,
            manifest,
            base_path,
        } = config;

        let dev_server = Arc::new(dev_config.to_dev_server());
        let directory_provider =
            BuildDirectoryProvider::new(build.directory.unwrap_or_default(), dev_server.clone());
        let mapper = mapper.unwrap_or_else(|| manifest.mapper.into_mapper());
        let mut dependencies = Vec::new();

        let (fallback, fallback_kind): (SharedResolver, FallbackKind) = match manifest.name {
            None => (Arc::new(IdentityAssetNameResolver), FallbackKind::Identity),
            Some(name) if !manifest.optimize => {
                let loader = ManifestLoader::from_boxed(directory_provider.clone(), mapper);
                (
                    Arc::new(ManifestAssetNameResolver::new(name, loader)),
                    FallbackKind::Manifest,
                )
            }
            Some(name) => {
                let loader = ManifestLoader::from_boxed(directory_provider.clone(), mapper);
                let loaded = loader.load_manifest(&name)?;
                dependencies.push(BuildDependency::capture(loader.manifest_path(&name)));
                (
                    Arc::new(StaticAssetNameResolver::new(loaded)),
                    FallbackKind::Static,
                )
            }
        };

        let (resolver, kind): (SharedResolver, ResolverKind) = if dev_server.is_enabled() {
            let resolver =
                DevServerAssetNameResolver::with_fallback(dev_server.url(), "", fallback)
                    .ignore(dev_config.ignored_assets);
            (Arc::new(resolver), ResolverKind::DevServer(fallback_kind))
        } else {
            let kind = match fallback_kind {
                FallbackKind::Identity => ResolverKind::Identity,
                FallbackKind::Manifest => ResolverKind::Manifest,
                FallbackKind::Static => ResolverKind::Static,
            };
            (fallback, kind)
        };

        info!("Resolving asset names with the {kind} resolver");

        let (resolver, debug) = if debugger {
            let debug = Arc::new(DebugAssetNameResolver::new(resolver));
            (debug.clone() as SharedResolver, Some(debug))
        } else {
            (resolver, None)
        };

        let locator = AssetLocator::new(
            resolver.clone(),
            PublicPathProvider::new(base_path, build.public_path.unwrap_or_default()),
            directory_provider,
        );

        Ok(Assets {
            resolver,
            debug,
            locator,
            dependencies,
            kind,
            dev_server,
        })
    }
}

/// Everything [`AssetsBuilder`] wires up.
pub struct Assets {
    resolver: SharedResolver,
    debug: Option<Arc<DebugAssetNameResolver<SharedResolver>>>,
    locator: AssetLocator,
    dependencies: Vec<BuildDependency>,
    kind: ResolverKind,
    dev_server: Arc<DevServer>,
}

impl Assets {
    pub fn resolver(&self) -> SharedResolver {
        self.resolver.clone()
    }

    pub fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        self.resolver.resolve(asset_name)
    }

    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    /// The recording resolver, when the debugger is enabled.
    pub fn debug(&self) -> Option<&DebugAssetNameResolver<SharedResolver>> {
        self.debug.as_deref()
    }

    pub fn dependencies(&self) -> &[BuildDependency] {
        &self.dependencies
    }

    /// Whether any file the resolver was built from has changed since.
    pub fn is_stale(&self) -> bool {
        self.dependencies.iter().any(BuildDependency::is_stale)
    }

    pub fn kind(&self) -> ResolverKind {
        self.kind
    }

    pub fn dev_server(&self) -> &DevServer {
        &self.dev_server
    }
}
