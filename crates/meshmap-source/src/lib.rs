pub mod cli;
pub mod fixture;
pub mod pipeline;
pub mod types;

pub use cli::MeshtasticCli;
pub use fixture::FixtureSource;
pub use pipeline::{collect_snapshot, fetch_gateway_info, fetch_nodes, Snapshot};
pub use types::{GatewayInfoSource, NodeSource, SourceError};
