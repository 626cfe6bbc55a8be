use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use openshift_version::config::{LOG_ENV, ResolverConfig};
use openshift_version::fleet::{FleetResults, failure_count, resolve_fleet};
use openshift_version::inventory::loader::load_inventory;
use openshift_version::inventory::types::DeploymentType;
use openshift_version::version::engine::{Resolution, VersionEngine};
use openshift_version::version::grammar::validate_image_tag;

#[derive(Parser)]
#[command(name = "openshift-version")]
#[command(version, about = "Resolve the OpenShift version, image tag and package version per host")]
struct Cli {
    /// Resolver configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve versions for the hosts of an inventory
    Resolve {
        /// Inventory file (JSON)
        #[arg(long)]
        inventory: PathBuf,

        /// Only resolve this host
        #[arg(long)]
        host: Option<String>,
    },
    /// Validate an image tag against a deployment type's grammar
    CheckTag {
        #[arg(long, default_value = "origin")]
        deployment_type: String,

        tag: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Per-host entry of the printed report
#[derive(Serialize)]
#[serde(untagged)]
enum HostReport {
    Done(Resolution),
    Failed { status: &'static str, error: String },
}

fn init_tracing(format: LogFormat) -> tracing_appender::non_blocking::WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    guard
}

fn report(results: FleetResults) -> IndexMap<String, HostReport> {
    results
        .into_iter()
        .map(|(name, result)| {
            let entry = match result {
                Ok(resolution) => HostReport::Done(resolution),
                Err(e) => HostReport::Failed {
                    status: "failed",
                    error: e.to_string(),
                },
            };
            (name, entry)
        })
        .collect()
}

async fn resolve(
    config: &ResolverConfig,
    inventory: PathBuf,
    host: Option<String>,
) -> anyhow::Result<()> {
    let mut hosts = load_inventory(&inventory, config)
        .with_context(|| format!("loading inventory {}", inventory.display()))?;
    if let Some(name) = host {
        hosts.retain(|h| h.name == name);
        if hosts.is_empty() {
            bail!("host {} is not in the inventory", name);
        }
    }

    let engine = Arc::new(VersionEngine::from_config(config));
    let results = resolve_fleet(engine, hosts).await;
    let failures = failure_count(&results);

    println!("{}", serde_json::to_string_pretty(&report(results))?);

    if failures > 0 {
        bail!("version resolution failed for {} host(s)", failures);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_format);
    let config = ResolverConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Command::Resolve { inventory, host } => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(resolve(&config, inventory, host)),
        Command::CheckTag {
            deployment_type,
            tag,
        } => {
            let deployment_type = DeploymentType::from(deployment_type.as_str());
            validate_image_tag(Some(tag.as_str()), &deployment_type)?;
            println!("{} is a valid {} image tag", tag, deployment_type);
            Ok(())
        }
    }
}
