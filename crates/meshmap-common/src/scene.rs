use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::gateway::GatewayInfo;
use crate::node::{Coordinates, Node};
use crate::quality::{classify, QualityThresholds, QualityTier};

pub const LINK_WEIGHT: u8 = 6;
pub const LINK_OPACITY: f32 = 0.9;

const UNKNOWN_OWNER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapDefaults {
    /// Used when the gateway does not report its own position.
    pub center: Coordinates,
    pub zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: Coordinates::new(48.2082, 16.3738),
            zoom: 13,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    Blue,
    Green,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMarker {
    pub position: Coordinates,
    pub label: String,
    pub color: MarkerColor,
}

/// Line from a node to the gateway, colored by the node's tier.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapLink {
    pub from: Coordinates,
    pub to: Coordinates,
    pub tier: QualityTier,
    pub weight: u8,
    pub opacity: f32,
}

/// Everything the map widget needs for one gateway.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapScene {
    pub center: Coordinates,
    pub zoom: u8,
    /// False when `center` is the configured fallback.
    pub gateway_located: bool,
    pub gateway_marker: MapMarker,
    pub markers: Vec<MapMarker>,
    pub links: Vec<MapLink>,
    pub thresholds: QualityThresholds,
    pub direct_connections: usize,
    /// Direct connections left off the map for lack of coordinates.
    pub unplaced: usize,
    pub generated_at: DateTime<Utc>,
}

pub fn node_label(node: &Node) -> String {
    match node.signal_quality {
        Some(snr) => format!("{} (SNR: {snr:?})", node.name),
        None => format!("{} (SNR: N/A)", node.name),
    }
}

/// Assemble the scene for an already filtered set of direct connections.
/// Thresholds use every node; markers and links only those with coordinates.
pub fn build_scene(nodes: &[Node], gateway: &GatewayInfo, defaults: &MapDefaults) -> MapScene {
    let center = gateway.position.unwrap_or(defaults.center);
    let classification = classify(nodes);

    let owner = gateway.owner.as_deref().unwrap_or(UNKNOWN_OWNER);
    let gateway_marker = MapMarker {
        position: center,
        label: format!("Own position: {owner}"),
        color: MarkerColor::Blue,
    };

    let mut markers = Vec::new();
    let mut links = Vec::new();
    for (node, tier) in nodes.iter().zip(&classification.tiers) {
        let Some(position) = node.coordinates else {
            continue;
        };
        markers.push(MapMarker {
            position,
            label: node_label(node),
            color: MarkerColor::Green,
        });
        links.push(MapLink {
            from: position,
            to: center,
            tier: *tier,
            weight: LINK_WEIGHT,
            opacity: LINK_OPACITY,
        });
    }

    MapScene {
        center,
        zoom: defaults.zoom,
        gateway_located: gateway.position.is_some(),
        gateway_marker,
        unplaced: nodes.len() - markers.len(),
        direct_connections: nodes.len(),
        markers,
        links,
        thresholds: classification.thresholds,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::HopsAway;

    fn make_node(name: &str, snr: f64, coords: Option<(f64, f64)>) -> Node {
        Node {
            id: format!("!{name}"),
            name: name.to_string(),
            signal_quality: Some(snr),
            last_heard_secs: 60,
            hops_away: HopsAway::Hops(0),
            coordinates: coords.map(|(lat, lon)| Coordinates::new(lat, lon)),
        }
    }

    #[test]
    fn test_default_center_when_gateway_unlocated() {
        let scene = build_scene(&[], &GatewayInfo::default(), &MapDefaults::default());
        assert_eq!(scene.center, Coordinates::new(48.2082, 16.3738));
        assert!(!scene.gateway_located);
        assert_eq!(scene.gateway_marker.label, "Own position: Unknown");
        assert_eq!(scene.gateway_marker.color, MarkerColor::Blue);
        assert!(scene.markers.is_empty());
        assert!(scene.links.is_empty());
        assert_eq!(scene.zoom, 13);
    }

    #[test]
    fn test_links_point_at_gateway() {
        let gateway = GatewayInfo {
            owner: Some("GW".to_string()),
            position: Some(Coordinates::new(47.0, 15.0)),
        };
        let nodes = vec![
            make_node("a", 1.0, Some((47.1, 15.1))),
            make_node("b", 5.0, None),
            make_node("c", 9.0, Some((47.2, 15.2))),
        ];
        let scene = build_scene(&nodes, &gateway, &MapDefaults::default());

        assert!(scene.gateway_located);
        assert_eq!(scene.gateway_marker.label, "Own position: GW");
        // "b" has no coordinates but still shapes the thresholds
        assert_eq!(scene.thresholds, QualityThresholds { lower: 5.0, upper: 9.0 });
        assert_eq!(scene.direct_connections, 3);
        assert_eq!(scene.unplaced, 1);

        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.markers[0].label, "a (SNR: 1.0)");
        assert_eq!(scene.markers[0].color, MarkerColor::Green);

        let tiers: Vec<QualityTier> = scene.links.iter().map(|l| l.tier).collect();
        assert_eq!(tiers, vec![QualityTier::Red, QualityTier::Green]);
        assert!(scene.links.iter().all(|l| l.to == Coordinates::new(47.0, 15.0)));
        assert_eq!(scene.links[1].from, Coordinates::new(47.2, 15.2));
        assert_eq!(scene.links[0].weight, LINK_WEIGHT);
    }

    #[test]
    fn test_scene_serializes_tier_names() {
        let nodes = vec![make_node("a", 1.0, Some((1.0, 2.0)))];
        let scene = build_scene(&nodes, &GatewayInfo::default(), &MapDefaults::default());
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["links"][0]["tier"], "red");
        assert_eq!(json["gateway_marker"]["color"], "blue");
        assert_eq!(json["center"]["latitude"], 48.2082);
    }
}
