mod args;
mod output;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use meshmap_common::{build_scene, classify, MapDefaults};
use meshmap_source::{collect_snapshot, FixtureSource, MeshtasticCli, Snapshot};

use crate::args::Args;

async fn snapshot(args: &Args) -> Result<Snapshot> {
    if let (Some(nodes_file), Some(info_file)) = (&args.nodes_file, &args.info_file) {
        let nodes = tokio::fs::read_to_string(nodes_file)
            .await
            .with_context(|| format!("reading {}", nodes_file.display()))?;
        let info = tokio::fs::read_to_string(info_file)
            .await
            .with_context(|| format!("reading {}", info_file.display()))?;
        let src = FixtureSource::new(nodes, info);
        return Ok(collect_snapshot(&src, &src, &args.host).await);
    }

    let cli = MeshtasticCli::new(
        args.meshtastic_bin.clone(),
        Duration::from_secs(args.command_timeout_secs),
    );
    Ok(collect_snapshot(&cli, &cli, &args.host).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the table or JSON; diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let snap = snapshot(&args).await?;
    let scene = build_scene(&snap.nodes, &snap.gateway, &MapDefaults::default());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    output::print_gateway(&args.host, &scene);
    output::print_connections(&snap.nodes, &classify(&snap.nodes));
    if snap.failures > 0 {
        eprintln!("\n{} mesh tool call(s) failed, see log output", snap.failures);
    }
    Ok(())
}
