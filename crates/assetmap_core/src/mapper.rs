//! Built-in [`ManifestMapper`] implementations.
//!
//! Bundlers disagree on the manifest layout. The default [`IdentityMapper`] expects the flat
//! `{"app.js": "/build/app.abc123.js"}` shape written by e.g. `webpack-manifest-plugin`; the
//! other mappers unwrap the nested shapes of `assets-webpack-plugin` and webpack's stats output.

use crate::error::MapperError;
use crate::manifest::Manifest;
use crate::traits::ManifestMapper;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Selects one of the built-in mappers by its configuration name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapperKind {
    #[default]
    Identity,
    AssetsPlugin,
    ChunkNames,
}

impl MapperKind {
    pub fn into_mapper(self) -> Box<dyn ManifestMapper> {
        match self {
            Self::Identity => Box::new(IdentityMapper),
            Self::AssetsPlugin => Box::new(AssetsPluginMapper),
            Self::ChunkNames => Box::new(ChunkNameMapper),
        }
    }
}

/// Passes a flat string-to-string object through unchanged.
///
/// The shape is not validated. Entries that are not non-empty strings are dropped and show up
/// later as missing assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl ManifestMapper for IdentityMapper {
    fn map(&self, raw: Value) -> Result<Manifest, MapperError> {
        let Value::Object(entries) = raw else {
            return Ok(Manifest::default());
        };

        Ok(entries
            .into_iter()
            .filter_map(|(name, path)| match path {
                Value::String(path) if !path.is_empty() => Some((name, path)),
                _ => None,
            })
            .collect())
    }
}

/// Maps the `assets-webpack-plugin` layout:
///
/// ```json
/// { "main": { "js": "/build/main.abc.js", "css": ["/build/main.abc.css"] } }
/// ```
///
/// into `main.js` and `main.css`. For array values the first non-empty file wins; an entry
/// without any file is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetsPluginMapper;

impl ManifestMapper for AssetsPluginMapper {
    fn map(&self, raw: Value) -> Result<Manifest, MapperError> {
        let chunks = expect_object(raw, "")?;
        let mut entries = HashMap::new();

        for (chunk, assets) in chunks {
            let pointer = format!("/{}", escape_pointer(&chunk));
            let assets = expect_object(assets, &pointer)?;

            // unnamed chunk, e.g. images emitted by loaders
            if chunk.is_empty() {
                continue;
            }

            for (extension, files) in assets {
                let pointer = format!("{pointer}/{}", escape_pointer(&extension));
                let files = expect_files(files, &pointer)?;
                if let Some(file) = files.into_iter().find(|file| !file.is_empty()) {
                    entries.insert(format!("{chunk}.{extension}"), file);
                }
            }
        }

        Ok(Manifest::new(entries))
    }
}

/// Maps the `assetsByChunkName` section of webpack's stats JSON.
///
/// Every emitted file is keyed by its chunk name plus the file's own extension, so a chunk
/// `main` emitting `["main.abc.js", "main.abc.css"]` yields `main.js` and `main.css`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkNameMapper;

impl ManifestMapper for ChunkNameMapper {
    fn map(&self, raw: Value) -> Result<Manifest, MapperError> {
        let mut stats = expect_object(raw, "")?;
        let chunks = stats
            .remove("assetsByChunkName")
            .ok_or_else(|| MapperError::UnexpectedShape {
                pointer: "/assetsByChunkName".to_string(),
                expected: "an object",
            })?;
        let chunks = expect_object(chunks, "/assetsByChunkName")?;
        let mut entries = HashMap::new();

        for (chunk, files) in chunks {
            let pointer = format!("/assetsByChunkName/{}", escape_pointer(&chunk));
            for file in expect_files(files, &pointer)? {
                let Some(extension) = Path::new(&file).extension().and_then(|e| e.to_str()) else {
                    continue;
                };
                entries
                    .entry(format!("{chunk}.{extension}"))
                    .or_insert(file);
            }
        }

        Ok(Manifest::new(entries))
    }
}

fn expect_object(value: Value, pointer: &str) -> Result<Map<String, Value>, MapperError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(MapperError::UnexpectedShape {
            pointer: pointer.to_string(),
            expected: "an object",
        }),
    }
}

fn expect_files(value: Value, pointer: &str) -> Result<Vec<String>, MapperError> {
    let unexpected = || MapperError::UnexpectedShape {
        pointer: pointer.to_string(),
        expected: "a file name or an array of file names",
    };

    match value {
        Value::String(file) => Ok(vec![file]),
        Value::Array(files) => files
            .into_iter()
            .map(|file| match file {
                Value::String(file) => Ok(file),
                _ => Err(unexpected()),
            })
            .collect(),
        _ => Err(unexpected()),
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
