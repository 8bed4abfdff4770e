pub use assetmap_core::*;

#[cfg(feature = "loader")]
pub mod loader {
    pub use assetmap_loader::*;
}

#[cfg(feature = "setup")]
pub mod setup {
    pub use assetmap_setup::*;
}

pub mod prelude {
    pub use assetmap_core::prelude::*;

    #[cfg(feature = "loader")]
    pub use assetmap_loader::{
        BuildDirectoryProvider, DevServer, ManifestAssetNameResolver, ManifestLoader,
    };

    #[cfg(feature = "setup")]
    pub use assetmap_setup::prelude::*;

    #[cfg(feature = "setup")]
    pub use assetmap_setup::{AssetLocator, ResolverKind};
}
