pub mod filter;
pub mod gateway;
pub mod node;
pub mod normalize;
pub mod quality;
pub mod scene;
pub mod table;

pub use filter::{direct_connections, is_direct_connection, STALE_AFTER_SECS};
pub use gateway::{extract_gateway_info, GatewayInfo};
pub use node::{Coordinates, HopsAway, Node};
pub use normalize::{normalize_row, FieldValue};
pub use quality::{classify, Classification, QualityThresholds, QualityTier};
pub use scene::{build_scene, MapDefaults, MapLink, MapMarker, MapScene, MarkerColor};
pub use table::{parse_table, RawRow};

pub mod telemetry;

/// Parse a node table and normalize every accepted row. No filtering.
pub fn parse_nodes(text: &str) -> Vec<Node> {
    parse_table(text).iter().map(normalize_row).collect()
}
