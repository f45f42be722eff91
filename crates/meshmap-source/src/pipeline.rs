use meshmap_common::{direct_connections, extract_gateway_info, parse_nodes, GatewayInfo, Node};

use crate::types::{GatewayInfoSource, NodeSource};

/// Result of querying one gateway: its direct connections and self-info.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Rows the table parser accepted, before filtering.
    pub rows: usize,
    pub nodes: Vec<Node>,
    pub gateway: GatewayInfo,
    /// Collaborator calls that failed and were replaced by an empty result.
    pub failures: u32,
}

async fn node_listing(source: &dyn NodeSource, host: &str) -> Option<(usize, Vec<Node>)> {
    match source.node_table(host).await {
        Ok(text) => {
            let parsed = parse_nodes(&text);
            let rows = parsed.len();
            Some((rows, direct_connections(parsed)))
        }
        Err(e) => {
            tracing::warn!(error=%e, %host, "node listing failed, continuing without nodes");
            None
        }
    }
}

async fn gateway_listing(source: &dyn GatewayInfoSource, host: &str) -> Option<GatewayInfo> {
    match source.gateway_info(host).await {
        Ok(text) => Some(extract_gateway_info(&text)),
        Err(e) => {
            tracing::warn!(error=%e, %host, "gateway info query failed, continuing without it");
            None
        }
    }
}

/// Direct connections of `host`; empty when the source fails.
pub async fn fetch_nodes(source: &dyn NodeSource, host: &str) -> Vec<Node> {
    node_listing(source, host)
        .await
        .map(|(_, nodes)| nodes)
        .unwrap_or_default()
}

/// Self-info of `host`; all fields empty when the source fails.
pub async fn fetch_gateway_info(source: &dyn GatewayInfoSource, host: &str) -> GatewayInfo {
    gateway_listing(source, host).await.unwrap_or_default()
}

/// Query both collaborators one after the other, node listing first.
pub async fn collect_snapshot(
    nodes: &dyn NodeSource,
    info: &dyn GatewayInfoSource,
    host: &str,
) -> Snapshot {
    let mut failures = 0;

    let (rows, nodes) = match node_listing(nodes, host).await {
        Some(listing) => listing,
        None => {
            failures += 1;
            (0, Vec::new())
        }
    };

    let gateway = match gateway_listing(info, host).await {
        Some(gateway) => gateway,
        None => {
            failures += 1;
            GatewayInfo::default()
        }
    };

    tracing::debug!(%host, rows, direct = nodes.len(), failures, "snapshot collected");
    Snapshot {
        rows,
        nodes,
        gateway,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureSource;
    use meshmap_common::{Coordinates, HopsAway};

    const TABLE: &str = "\
│  N │ User  │ ID      │ AKA │ Hardware │ Latitude │ Longitude │ Altitude │ Battery │ Channel util. │ Tx air util. │ SNR     │ Hops    │ Channel │ LastHeard           │ Since       │
│  1 │ Alice │ !abc123 │ AL  │ TBEAM    │ 48.1°    │ 16.3°     │ 200 m    │ 90%     │ 1.00%         │ 2.00%        │ 5.0 dB  │ 0       │ 0       │ 2024-05-01 12:00:00 │ 3 min ago   │
│  2 │ Bob   │ !def456 │ BO  │ TBEAM    │ N/A      │ N/A       │ N/A      │ N/A     │ N/A           │ N/A          │ -2.5 dB │ unknown │ 0       │ 2024-05-01 11:00:00 │ 2 hours ago │
│  3 │ Carol │ !0a0b0c │ CA  │ RAK4631  │ 48.2°    │ 16.4°     │ 190 m    │ 80%     │ 1.00%         │ 2.00%        │ 7.0 dB  │ 2       │ 0       │ 2024-05-01 12:00:00 │ 1 min ago   │
│  4 │ Dave  │ !0d0e0f │ DA  │ RAK4631  │ 48.3°    │ 16.5°     │ 190 m    │ 80%     │ 1.00%         │ 2.00%        │ 7.0 dB  │ 0       │ 0       │ 2024-04-20 12:00:00 │ 11 days ago │
";

    const INFO: &str = "Owner: Gateway (GW)\n\"latitude\": 48.0, \"longitude\": 16.0\n";

    #[tokio::test]
    async fn test_collect_snapshot() {
        let src = FixtureSource::new(TABLE, INFO);
        let snap = collect_snapshot(&src, &src, "gw").await;

        assert_eq!(snap.rows, 5);
        assert_eq!(snap.failures, 0);
        let names: Vec<&str> = snap.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
        assert_eq!(snap.nodes[1].hops_away, HopsAway::Unknown);
        assert_eq!(snap.nodes[1].coordinates, None);
        assert_eq!(snap.gateway.owner.as_deref(), Some("Gateway (GW)"));
        assert_eq!(snap.gateway.position, Some(Coordinates::new(48.0, 16.0)));
        assert_eq!(src.node_calls(), 1);
        assert_eq!(src.info_calls(), 1);
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let src = FixtureSource::failing();
        let snap = collect_snapshot(&src, &src, "gw").await;
        assert_eq!(snap.failures, 2);
        assert!(snap.nodes.is_empty());
        assert_eq!(snap.gateway, GatewayInfo::default());

        assert!(fetch_nodes(&src, "gw").await.is_empty());
        assert_eq!(fetch_gateway_info(&src, "gw").await, GatewayInfo::default());
    }

    #[tokio::test]
    async fn test_info_failure_keeps_nodes() {
        let src = FixtureSource::new(TABLE, INFO).with_gateway_info(None);
        let snap = collect_snapshot(&src, &src, "gw").await;
        assert_eq!(snap.failures, 1);
        assert_eq!(snap.nodes.len(), 2);
        assert_eq!(snap.gateway, GatewayInfo::default());
    }

    #[tokio::test]
    async fn test_node_failure_keeps_gateway() {
        let src = FixtureSource::new(TABLE, INFO).with_node_table(None);
        let snap = collect_snapshot(&src, &src, "gw").await;
        assert_eq!(snap.failures, 1);
        assert_eq!(snap.rows, 0);
        assert!(snap.nodes.is_empty());
        assert_eq!(snap.gateway.owner.as_deref(), Some("Gateway (GW)"));
        assert_eq!(src.info_calls(), 1);
    }
}
