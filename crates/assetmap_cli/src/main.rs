use anyhow::Context;
use assetmap_loader::{BuildDirectoryProvider, ManifestLoader};
use assetmap_setup::{AssetsBuilder, AssetsConfig};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "assetmap")]
#[command(about = "Resolve bundler asset names to the URLs they are served under")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, env = "ASSETMAP_CONFIG", default_value = "assets.json")]
    config: PathBuf,

    /// Use debug mode defaults (dev server and debugger on, manifest loaded lazily)
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve asset names through the configured resolver
    Resolve {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the public URL of each asset
    Locate {
        #[arg(required = true)]
        names: Vec<String>,

        /// Print paths inside the build directory instead
        #[arg(long)]
        build_dir: bool,
    },
    /// Load the manifest and print it as JSON
    Manifest,
    /// List the files the resolver depends on and whether they changed
    Deps,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let defaults = AssetsConfig::defaults(cli.debug, true);
    let config = AssetsConfig::from_path(&cli.config, defaults)?;

    match cli.command {
        Commands::Resolve { names } => {
            let assets = AssetsBuilder::new(config).build()?;
            for name in names {
                let resolved = assets
                    .resolve(&name)
                    .with_context(|| format!("Failed to resolve '{name}'"))?;
                println!("{name} -> {resolved}");
            }
        }
        Commands::Locate { names, build_dir } => {
            let assets = AssetsBuilder::new(config).build()?;
            let locator = assets.locator();
            for name in names {
                let result = if build_dir {
                    locator.locate_in_build_directory(&name)
                } else {
                    locator.locate_in_public_path(&name)
                };
                let located = result.with_context(|| format!("Failed to locate '{name}'"))?;
                println!("{located}");
            }
        }
        Commands::Manifest => {
            config.validate()?;
            let name = config
                .manifest
                .name
                .as_deref()
                .context("No manifest configured, asset names resolve to themselves")?;

            let directory_provider = BuildDirectoryProvider::new(
                config.build.directory.clone().unwrap_or_default(),
                Arc::new(config.dev_server.to_dev_server()),
            );
            let mapper = config.manifest.mapper.into_mapper();
            let loader = ManifestLoader::from_boxed(directory_provider, mapper);

            eprintln!("🔍 Loading {}...", loader.manifest_path(name));
            let manifest = loader.load_manifest(name)?;
            let sorted: BTreeMap<_, _> = manifest.iter().collect();
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        Commands::Deps => {
            let assets = AssetsBuilder::new(config).build()?;
            if assets.dependencies().is_empty() {
                eprintln!("No build dependencies registered (manifest not optimized).");
            }
            for dependency in assets.dependencies() {
                let state = if dependency.is_stale() { "stale" } else { "fresh" };
                println!(
                    "{}\t{}\t{state}",
                    dependency.path(),
                    dependency.digest().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
