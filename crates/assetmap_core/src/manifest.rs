use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The "Manifest" is the lookup table produced by a bundler.
/// It maps logical asset names ("app.js") to served paths ("/build/app.abc123.js").
///
/// A manifest is immutable once built. Resolvers share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: HashMap<String, String>,
}

impl Manifest {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// The served path for `asset_name`, if the bundler emitted one.
    pub fn get(&self, asset_name: &str) -> Option<&str> {
        self.entries.get(asset_name).map(String::as_str)
    }

    pub fn contains(&self, asset_name: &str) -> bool {
        self.entries.contains_key(asset_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_flat_object() {
        let manifest: Manifest = [("app.js", "/build/app.abc123.js")].into_iter().collect();
        let json = serde_json::to_value(&manifest).unwrap();

        assert_eq!(json, serde_json::json!({ "app.js": "/build/app.abc123.js" }));
    }

    #[test]
    fn lookup_is_exact() {
        let manifest: Manifest = [("app.js", "/build/app.js")].into_iter().collect();

        assert_eq!(manifest.get("app.js"), Some("/build/app.js"));
        assert!(manifest.get("App.js").is_none());
        assert!(!manifest.contains("app.css"));
        assert_eq!(manifest.len(), 1);
    }
}
