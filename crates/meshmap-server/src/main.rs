mod args;
mod error;
mod handlers;
mod metrics;
mod page;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use clap::Parser;

use meshmap_common::{Coordinates, MapDefaults};
use meshmap_source::MeshtasticCli;

use crate::args::Args;
use crate::handlers::{healthz, map_json, map_view};
use crate::metrics::{metrics_handler, track_requests};
use crate::state::AppState;

fn build_router(st: AppState) -> Router {
    Router::new()
        .route("/", get(map_view))
        .route("/api/map", get(map_json))
        .route("/healthz", get(healthz))
        .route("/health", get(healthz))
        .route("/metrics", get(metrics_handler))
        .layer(middleware::from_fn_with_state(st.clone(), track_requests))
        .with_state(st)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error=%e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let otel_provider = meshmap_common::telemetry::init_tracing(
        "meshmap-server",
        args.otlp_endpoint.as_deref(),
        args.otlp_token.as_deref(),
        &args.log_format,
    );

    let cli = Arc::new(MeshtasticCli::new(
        args.meshtastic_bin.clone(),
        Duration::from_secs(args.command_timeout_secs),
    ));

    let st = AppState {
        nodes: cli.clone(),
        info: cli.clone(),
        defaults: MapDefaults {
            center: Coordinates::new(args.default_lat, args.default_lon),
            zoom: args.zoom,
        },
        metrics: Arc::new(metrics::Metrics::default()),
    };

    let app = build_router(st);

    tracing::info!(
        listen_addr=%args.listen_addr,
        meshtastic_bin=%cli.program(),
        timeout_secs = args.command_timeout_secs,
        "meshmap-server starting"
    );
    let listener = tokio::net::TcpListener::bind(&args.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = otel_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error=%e, "failed to flush OTLP spans");
        }
    }
    Ok(())
}
