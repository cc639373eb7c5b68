//! Prints toolset help and the tools a given configuration exposes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use toolgate::Gateway;
use toolgate::catalog::{remote_only_toolsets, toolsets_help};
use toolgate::config::{GatewayConfig, parse_toolset_list};
use toolgate::telemetry::{LogFormat, init_tracing};
use toolgate::tools::{ToolDependencies, TranslationTable};
use tracing::debug;

/// Prefix of variables overriding tool titles and descriptions.
const TRANSLATION_PREFIX: &str = "TOOLGATE_TEXT_";

/// Inspect toolset selection for the bundled catalog.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file; `TOOLGATE_*` variables are used when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output layout.
    #[arg(long, global = true, default_value = "compact")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the help text of the toolset selection flag.
    Describe {
        /// Also list toolsets only offered by the hosted deployment.
        #[arg(long)]
        remote: bool,
    },
    /// Resolve a toolset request and list the tools it enables.
    Resolve {
        /// Comma-separated toolsets, overriding the configuration.
        #[arg(long)]
        toolsets: Option<String>,
        /// Enable dynamic toolset discovery.
        #[arg(long)]
        dynamic_toolsets: bool,
        /// Expose only read-only tools.
        #[arg(long)]
        read_only: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<GatewayConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GatewayConfig::from_toml_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))
        }
        None => GatewayConfig::from_env().context("failed to read environment"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;
    init_tracing(&config.log_filter, cli.log_format)?;

    match cli.command {
        Command::Describe { remote } => {
            println!("{}", toolsets_help()?);
            if remote {
                println!("Remote-only toolsets:");
                for toolset in remote_only_toolsets() {
                    println!("  - {}: {}", toolset.id(), toolset.description());
                }
            }
        }
        Command::Resolve {
            toolsets,
            dynamic_toolsets,
            read_only,
        } => {
            if let Some(toolsets) = toolsets {
                config.toolsets = parse_toolset_list(&toolsets);
            }
            config.dynamic_toolsets |= dynamic_toolsets;
            config.read_only |= read_only;

            let translations = TranslationTable::from_env(TRANSLATION_PREFIX);
            debug!(overrides = translations.len(), "translation table loaded");
            let translate = move |key: &str, fallback: &str| translations.translate(key, fallback);

            let gateway = Gateway::with_catalog(
                config,
                &translate,
                Arc::new(ToolDependencies::unconfigured()),
            )?;

            let snapshot = gateway.dispatcher().enablement().snapshot();
            println!("Enabled toolsets:");
            for id in snapshot.ids() {
                println!("  - {id}");
            }
            println!("Tools:");
            for tool in gateway.enabled_tools() {
                let access = if tool.is_read_only() { "read" } else { "write" };
                println!("  - {} [{}] ({access})", tool.name(), tool.toolset());
            }
        }
    }

    Ok(())
}
