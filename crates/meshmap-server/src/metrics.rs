use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

#[derive(Debug, Default)]
pub struct Metrics {
    pub requests_total: AtomicU64,
    pub requests_inflight: AtomicU64,
    pub status_2xx: AtomicU64,
    pub status_4xx: AtomicU64,
    pub status_5xx: AtomicU64,
    pub maps_rendered: AtomicU64,
    pub collaborator_failures: AtomicU64,
    pub last_direct_connections: AtomicU64,
}

impl Metrics {
    pub fn record_map(&self, direct_connections: usize, failures: u32) {
        self.maps_rendered.fetch_add(1, Ordering::Relaxed);
        self.collaborator_failures
            .fetch_add(u64::from(failures), Ordering::Relaxed);
        self.last_direct_connections
            .store(direct_connections as u64, Ordering::Relaxed);
    }
}

pub fn render_metrics(metrics: &Metrics) -> String {
    let series: [(&str, &str, &str, &AtomicU64); 8] = [
        ("meshmap_requests_total", "counter", "Total requests handled.", &metrics.requests_total),
        ("meshmap_requests_inflight", "gauge", "Currently in-flight requests.", &metrics.requests_inflight),
        ("meshmap_responses_2xx", "counter", "Total 2xx responses.", &metrics.status_2xx),
        ("meshmap_responses_4xx", "counter", "Total 4xx responses.", &metrics.status_4xx),
        ("meshmap_responses_5xx", "counter", "Total 5xx responses.", &metrics.status_5xx),
        ("meshmap_maps_rendered_total", "counter", "Map scenes built.", &metrics.maps_rendered),
        (
            "meshmap_collaborator_failures_total",
            "counter",
            "Mesh tool invocations that failed or timed out.",
            &metrics.collaborator_failures,
        ),
        (
            "meshmap_last_direct_connections",
            "gauge",
            "Direct connections in the most recent map.",
            &metrics.last_direct_connections,
        ),
    ];

    let mut body = String::with_capacity(1024);
    for (name, kind, help, value) in series {
        let _ = writeln!(body, "# HELP {name} {help}");
        let _ = writeln!(body, "# TYPE {name} {kind}");
        let _ = writeln!(body, "{name} {}", value.load(Ordering::Relaxed));
    }
    body
}

pub async fn metrics_handler(State(st): State<AppState>) -> impl IntoResponse {
    let body = render_metrics(&st.metrics);
    (
        axum::http::StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

pub async fn track_requests(
    State(st): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, std::convert::Infallible> {
    st.metrics.requests_inflight.fetch_add(1, Ordering::Relaxed);
    let resp = next.run(req).await;
    st.metrics.requests_inflight.fetch_sub(1, Ordering::Relaxed);
    st.metrics.requests_total.fetch_add(1, Ordering::Relaxed);

    let status = resp.status().as_u16();
    if status >= 500 {
        st.metrics.status_5xx.fetch_add(1, Ordering::Relaxed);
    } else if status >= 400 {
        st.metrics.status_4xx.fetch_add(1, Ordering::Relaxed);
    } else if status >= 200 {
        st.metrics.status_2xx.fetch_add(1, Ordering::Relaxed);
    }

    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_metrics() {
        let m = Metrics::default();
        m.requests_total.store(7, Ordering::Relaxed);
        m.record_map(4, 1);
        m.record_map(3, 2);

        let body = render_metrics(&m);
        assert!(body.contains("# TYPE meshmap_requests_total counter\nmeshmap_requests_total 7\n"));
        assert!(body.contains("meshmap_maps_rendered_total 2\n"));
        assert!(body.contains("meshmap_collaborator_failures_total 3\n"));
        assert!(body.contains("meshmap_last_direct_connections 3\n"));
    }
}
