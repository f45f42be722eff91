use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::types::{GatewayInfoSource, NodeSource, SourceError};

pub const NODES_FLAG: &str = "--nodes";
pub const INFO_FLAG: &str = "--info";

/// Longest stderr excerpt carried in a [`SourceError::Failed`].
const STDERR_EXCERPT_CHARS: usize = 512;

/// Talks to a gateway through the `meshtastic` command-line tool over TCP.
#[derive(Debug, Clone)]
pub struct MeshtasticCli {
    program: String,
    timeout: Duration,
}

impl MeshtasticCli {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, host: &str, flag: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--host")
            .arg(host)
            .arg(flag)
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        cmd
    }

    async fn run(&self, host: &str, flag: &str) -> Result<String, SourceError> {
        let started = std::time::Instant::now();
        let output = match tokio::time::timeout(self.timeout, self.command(host, flag).output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(SourceError::Spawn {
                    program: self.program.clone(),
                    source: e,
                })
            }
            Err(_) => {
                return Err(SourceError::Timeout {
                    program: self.program.clone(),
                    timeout: self.timeout,
                })
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().chars().take(STDERR_EXCERPT_CHARS).collect(),
            });
        }

        tracing::debug!(
            %host,
            flag,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = output.stdout.len(),
            "mesh tool finished"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl NodeSource for MeshtasticCli {
    async fn node_table(&self, host: &str) -> Result<String, SourceError> {
        self.run(host, NODES_FLAG).await
    }
}

#[async_trait]
impl GatewayInfoSource for MeshtasticCli {
    async fn gateway_info(&self, host: &str) -> Result<String, SourceError> {
        self.run(host, INFO_FLAG).await
    }
}
