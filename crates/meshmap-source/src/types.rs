use std::time::Duration;

use async_trait::async_trait;

/// Why a collaborator produced no usable output.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool did not answer in time.
    #[error("`{program}` did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Raw node table for a gateway host.
#[async_trait]
pub trait NodeSource: Send + Sync {
    async fn node_table(&self, host: &str) -> Result<String, SourceError>;
}

/// Raw self-description text for a gateway host.
#[async_trait]
pub trait GatewayInfoSource: Send + Sync {
    async fn gateway_info(&self, host: &str) -> Result<String, SourceError>;
}
