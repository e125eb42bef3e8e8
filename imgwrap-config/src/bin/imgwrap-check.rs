use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use imgwrap_config::{ConfigSource, ManagerConfig, logging};
use imgwrap_core::{MemoryResourceCache, ResourceCache, ResourceStatus, SourceId};

#[derive(Parser)]
#[command(name = "imgwrap-check", about = "Inspect imgwrap manager configuration")]
struct Cli {
    /// Read this file instead of resolving the config from the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the effective configuration and where it came from
    Show {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Fail when the configuration violates a guard rail
    Validate,
    /// Print the tag a consumer shows for a raw status label
    Tag {
        /// Status label as reported by a loader (pending, error, ready, ...)
        status: String,
        /// Source id to render; defaults to a placeholder
        #[arg(long, default_value = "imgwrap-check://sample")]
        source: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn load(path: Option<PathBuf>) -> Result<(ManagerConfig, ConfigSource)> {
    match path {
        Some(path) => {
            let config = ManagerConfig::load_from_file(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        None => Ok(ManagerConfig::load_from_env()?),
    }
}

fn main() -> Result<()> {
    logging::init_tracing("info");

    let cli = Cli::parse();
    let (config, source) = load(cli.config)?;

    match cli.command {
        Command::Show { format } => {
            println!("# source: {source}");
            let rendered = match format {
                Format::Toml => toml::to_string_pretty(&config)
                    .context("failed to render config as toml")?,
                Format::Json => serde_json::to_string_pretty(&config)
                    .context("failed to render config as json")?,
            };
            println!("{rendered}");
        }
        Command::Validate => {
            let warnings = config
                .validate()
                .with_context(|| format!("invalid config from {source}"))?;
            if warnings.is_empty() {
                println!("ok ({source})");
            } else {
                println!("ok with {} warning(s) ({source})", warnings.len());
                for warning in warnings {
                    println!("  - {warning}");
                }
            }
        }
        Command::Tag { status, source: id } => {
            let status: ResourceStatus = status.parse()?;
            let manager = config.build_manager(MemoryResourceCache::new());
            let id = SourceId::from(id);
            manager.cache().lookup(&id).set_status(status);

            let mut consumer = manager.consumer_for(id);
            consumer.attach()?;
            let Some(tag) = consumer.presentation_tag() else {
                bail!("consumer resolved no presentation tag");
            };
            println!("{status} -> {tag} (clone leased: {})", consumer.is_leased());
        }
    }

    Ok(())
}
