use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use tracing::Instrument;

use meshmap_common::{build_scene, MapScene};
use meshmap_source::collect_snapshot;

use crate::error::RequestError;
use crate::page::render_map_page;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub(crate) struct MapQuery {
    host: Option<String>,
}

impl MapQuery {
    fn host(&self) -> Result<&str, RequestError> {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(RequestError::MissingHost)
    }
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn load_scene(st: &AppState, host: &str) -> MapScene {
    let request_id = format!("req_{}", uuid::Uuid::new_v4());
    let span = tracing::info_span!("map_request", %request_id, %host);

    async {
        let snapshot = collect_snapshot(st.nodes.as_ref(), st.info.as_ref(), host).await;
        let scene = build_scene(&snapshot.nodes, &snapshot.gateway, &st.defaults);
        st.metrics.record_map(scene.direct_connections, snapshot.failures);

        tracing::info!(
            rows = snapshot.rows,
            direct = scene.direct_connections,
            unplaced = scene.unplaced,
            lower = scene.thresholds.lower,
            upper = scene.thresholds.upper,
            failures = snapshot.failures,
            gateway_located = scene.gateway_located,
            "map scene built"
        );
        scene
    }
    .instrument(span)
    .await
}

/// `GET /?host=<host>`: the interactive map page.
pub async fn map_view(
    State(st): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Html<String>, RequestError> {
    let host = query.host()?;
    let scene = load_scene(&st, host).await;
    Ok(Html(render_map_page(host, &scene)?))
}

/// `GET /api/map?host=<host>`: the same scene as JSON.
pub async fn map_json(
    State(st): State<AppState>,
    Query(query): Query<MapQuery>,
) -> Result<Json<MapScene>, RequestError> {
    let host = query.host()?;
    Ok(Json(load_scene(&st, host).await))
}
