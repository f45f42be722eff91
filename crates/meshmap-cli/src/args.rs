use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "meshmap")]
#[command(about = "Show the direct radio links of a Meshtastic gateway", long_about = None)]
pub struct Args {
    /// Gateway host passed to `meshtastic --host`
    #[arg(long)]
    pub host: String,

    #[arg(long, env = "MESHMAP_MESHTASTIC_BIN", default_value = "meshtastic")]
    pub meshtastic_bin: String,

    #[arg(long, env = "MESHMAP_COMMAND_TIMEOUT_SECS", default_value_t = 30)]
    pub command_timeout_secs: u64,

    /// Print the map scene as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Read captured `--nodes` output instead of running the tool
    #[arg(long, requires = "info_file")]
    pub nodes_file: Option<PathBuf>,

    /// Read captured `--info` output instead of running the tool
    #[arg(long, requires = "nodes_file")]
    pub info_file: Option<PathBuf>,
}
