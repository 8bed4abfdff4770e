//! # Resolve Assets Example
//!
//! Resolves asset names against a manifest in a build directory.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --example resolve_assets -- ./public/build main.js main.css
//! ```

use assetmap::prelude::*;
use std::env;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let directory = args.next().unwrap_or_else(|| "./public/build".to_string());

    let mut config = AssetsConfig::defaults(false, false);
    config.build.directory = Some(directory);
    config.build.public_path = Some("build".to_string());
    config.manifest.name = Some("manifest.json".to_string());

    let assets = AssetsBuilder::new(config).build()?;
    println!("Resolver: {}", assets.kind());

    for name in args {
        match assets.locator().locate_in_public_path(&name) {
            Ok(url) => println!("{name} -> {url}"),
            Err(e) => println!("{name}: {e}"),
        }
    }

    for dependency in assets.dependencies() {
        println!("Depends on {}", dependency.path());
    }

    Ok(())
}
