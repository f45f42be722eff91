use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::types::{GatewayInfoSource, NodeSource, SourceError};

const FIXTURE_PROGRAM: &str = "fixture";

/// Serves canned tool output. `None` behaves like a tool exiting non-zero.
/// Counts calls so callers can assert a collaborator was never reached.
#[derive(Debug, Default)]
pub struct FixtureSource {
    node_table: Option<String>,
    gateway_info: Option<String>,
    node_calls: AtomicUsize,
    info_calls: AtomicUsize,
}

impl FixtureSource {
    pub fn new(node_table: impl Into<String>, gateway_info: impl Into<String>) -> Self {
        Self {
            node_table: Some(node_table.into()),
            gateway_info: Some(gateway_info.into()),
            ..Self::default()
        }
    }

    /// Both collaborators fail.
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn with_node_table(mut self, text: Option<String>) -> Self {
        self.node_table = text;
        self
    }

    pub fn with_gateway_info(mut self, text: Option<String>) -> Self {
        self.gateway_info = text;
        self
    }

    pub fn node_calls(&self) -> usize {
        self.node_calls.load(Ordering::Relaxed)
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::Relaxed)
    }

    fn serve(text: &Option<String>) -> Result<String, SourceError> {
        text.clone().ok_or_else(|| SourceError::Failed {
            program: FIXTURE_PROGRAM.to_string(),
            status: "exit status: 1".to_string(),
            stderr: "no fixture output".to_string(),
        })
    }
}

#[async_trait]
impl NodeSource for FixtureSource {
    async fn node_table(&self, _host: &str) -> Result<String, SourceError> {
        self.node_calls.fetch_add(1, Ordering::Relaxed);
        Self::serve(&self.node_table)
    }
}

#[async_trait]
impl GatewayInfoSource for FixtureSource {
    async fn gateway_info(&self, _host: &str) -> Result<String, SourceError> {
        self.info_calls.fetch_add(1, Ordering::Relaxed);
        Self::serve(&self.gateway_info)
    }
}
