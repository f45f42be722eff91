use std::sync::Arc;

use meshmap_common::MapDefaults;
use meshmap_source::{GatewayInfoSource, NodeSource};

use crate::metrics::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub nodes: Arc<dyn NodeSource>,
    pub info: Arc<dyn GatewayInfoSource>,
    pub defaults: MapDefaults,
    pub metrics: Arc<Metrics>,
}
