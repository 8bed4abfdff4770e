use assetmap_core::prelude::*;
use assetmap_loader::BuildDirectoryProvider;
use std::sync::Arc;

/// The URL path the build directory is served under, e.g. `/app/build`.
#[derive(Debug, Clone)]
pub struct PublicPathProvider {
    base_path: String,
    public_path: String,
}

impl PublicPathProvider {
    pub fn new(base_path: impl Into<String>, public_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_path: public_path.into(),
        }
    }

    pub fn path(&self) -> String {
        format!(
            "{}/{}",
            self.base_path.trim_end_matches('/'),
            self.public_path.trim_matches('/')
        )
    }
}

/// Turns asset names into URLs (or build directory paths) for templates.
#[derive(Clone)]
pub struct AssetLocator {
    resolver: Arc<dyn AssetNameResolver>,
    public_path: PublicPathProvider,
    directory_provider: BuildDirectoryProvider,
}

impl AssetLocator {
    pub fn new(
        resolver: Arc<dyn AssetNameResolver>,
        public_path: PublicPathProvider,
        directory_provider: BuildDirectoryProvider,
    ) -> Self {
        Self {
            resolver,
            public_path,
            directory_provider,
        }
    }

    pub fn locate_in_public_path(&self, asset_name: &str) -> Result<String, ResolveError> {
        let resolved = self.resolver.resolve(asset_name)?;
        Ok(join(&self.public_path.path(), resolved))
    }

    pub fn locate_in_build_directory(&self, asset_name: &str) -> Result<String, ResolveError> {
        let resolved = self.resolver.resolve(asset_name)?;
        Ok(join(&self.directory_provider.build_directory(), resolved))
    }
}

/// Appends `resolved` to `prefix` unless it already is an absolute URL.
fn join(prefix: &str, resolved: String) -> String {
    if is_absolute_url(&resolved) {
        return resolved;
    }

    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        resolved.trim_start_matches('/')
    )
}

fn is_absolute_url(value: &str) -> bool {
    if value.starts_with("//") {
        return true;
    }

    value.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locator(resolver: impl AssetNameResolver + 'static) -> AssetLocator {
        AssetLocator::new(
            Arc::new(resolver),
            PublicPathProvider::new("/app/", "/build/"),
            BuildDirectoryProvider::local("/var/www/build"),
        )
    }

    #[test]
    fn public_path_joins_base_path() {
        assert_eq!(PublicPathProvider::new("", "build").path(), "/build");
        assert_eq!(PublicPathProvider::new("/app/", "/build/").path(), "/app/build");
    }

    #[test]
    fn locates_resolved_names() {
        let manifest: Manifest = [("main.js", "main.abc.js")].into_iter().collect();
        let locator = locator(StaticAssetNameResolver::new(manifest));

        assert_eq!(
            locator.locate_in_public_path("main.js").unwrap(),
            "/app/build/main.abc.js"
        );
        assert_eq!(
            locator.locate_in_build_directory("main.js").unwrap(),
            "/var/www/build/main.abc.js"
        );
        assert!(matches!(
            locator.locate_in_public_path("missing.js"),
            Err(ResolveError::AssetNotFound(_))
        ));
    }

    #[test]
    fn keeps_absolute_urls() {
        let locator = locator(DevServerAssetNameResolver::new("https://localhost:8080", "/"));

        assert_eq!(
            locator.locate_in_public_path("app.js").unwrap(),
            "https://localhost:8080/app.js"
        );
    }

    #[test]
    fn recognizes_absolute_urls() {
        assert!(is_absolute_url("https://cdn.example.com/app.js"));
        assert!(is_absolute_url("//cdn.example.com/app.js"));
        assert!(!is_absolute_url("/build/app.js"));
        assert!(!is_absolute_url("app.js?redirect=http://x"));
    }
}
