use crate::error::ResolveError;
use crate::manifest::Manifest;
use crate::traits::AssetNameResolver;

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Used when no manifest is configured: asset names are served as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAssetNameResolver;

impl AssetNameResolver for IdentityAssetNameResolver {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        Ok(asset_name.to_string())
    }
}

/// Looks names up in a manifest that was loaded ahead of time.
#[derive(Debug, Clone)]
pub struct StaticAssetNameResolver {
    manifest: Arc<Manifest>,
}

impl StaticAssetNameResolver {
    pub fn new(manifest: impl Into<Arc<Manifest>>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

impl AssetNameResolver for StaticAssetNameResolver {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        self.manifest
            .get(asset_name)
            .map(str::to_string)
            .ok_or_else(|| ResolveError::AssetNotFound(asset_name.to_string()))
    }
}

/// Points every asset at the dev server, except for the ignored names which are handed to
/// `fallback` (e.g. vendor bundles the dev server does not build).
pub struct DevServerAssetNameResolver<F = IdentityAssetNameResolver> {
    base_url: String,
    public_url: String,
    ignored: HashSet<String>,
    fallback: F,
}

impl DevServerAssetNameResolver {
    pub fn new(base_url: impl Into<String>, public_url: impl Into<String>) -> Self {
        Self::with_fallback(base_url, public_url, IdentityAssetNameResolver)
    }
}

impl<F: AssetNameResolver> DevServerAssetNameResolver<F> {
    pub fn with_fallback(
        base_url: impl Into<String>,
        public_url: impl Into<String>,
        fallback: F,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            public_url: public_url.into(),
            ignored: HashSet::new(),
            fallback,
        }
    }

    pub fn ignore<I, S>(mut self, asset_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(asset_names.into_iter().map(Into::into));
        self
    }

    pub fn is_ignored(&self, asset_name: &str) -> bool {
        self.ignored.contains(asset_name)
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }
}

impl<F: AssetNameResolver> AssetNameResolver for DevServerAssetNameResolver<F> {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        if self.is_ignored(asset_name) {
            return self.fallback.resolve(asset_name);
        }

        let mut url = self.base_url.trim_end_matches('/').to_string();
        for segment in [
            self.public_url.trim_matches('/'),
            asset_name.trim_start_matches('/'),
        ] {
            if !segment.is_empty() {
                url.push('/');
                url.push_str(segment);
            }
        }

        Ok(url)
    }
}

/// A single call observed by [`DebugAssetNameResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    /// Position of the call, starting at zero for the first resolution.
    pub sequence: u64,
    pub asset_name: String,
    /// The resolved path, or the rendered error.
    pub outcome: Result<String, String>,
    pub resolved_at: DateTime<Utc>,
}

impl ResolutionRecord {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[derive(Default)]
struct RecordLog {
    next_sequence: u64,
    records: Vec<ResolutionRecord>,
}

/// Records every resolution of the wrapped resolver for later inspection, e.g. by a debug
/// panel. Results and errors are passed through untouched.
pub struct DebugAssetNameResolver<R> {
    inner: R,
    log: Mutex<RecordLog>,
}

impl<R: AssetNameResolver> DebugAssetNameResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            log: Mutex::new(RecordLog::default()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Snapshot of everything resolved so far, oldest first.
    pub fn records(&self) -> Vec<ResolutionRecord> {
        self.lock().records.clone()
    }

    /// Drops recorded entries. Sequence numbers keep counting.
    pub fn clear(&self) {
        self.lock().records.clear();
    }

    fn lock(&self) -> MutexGuard<'_, RecordLog> {
        // the log is append-only, a panic mid-push cannot leave it inconsistent
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: AssetNameResolver> AssetNameResolver for DebugAssetNameResolver<R> {
    fn resolve(&self, asset_name: &str) -> Result<String, ResolveError> {
        let result = self.inner.resolve(asset_name);

        let mut log = self.lock();
        let sequence = log.next_sequence;
        log.next_sequence += 1;
        log.records.push(ResolutionRecord {
            sequence,
            asset_name: asset_name.to_string(),
            outcome: result.as_ref().cloned().map_err(ToString::to_string),
            resolved_at: Utc::now(),
        });

        result
    }
}
