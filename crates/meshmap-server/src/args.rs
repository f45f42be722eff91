use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about = "Map of the direct radio links of a Meshtastic gateway")]
pub struct Args {
    #[arg(long, env = "MESHMAP_LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: String,

    /// Path or name of the `meshtastic` command-line tool.
    #[arg(long, env = "MESHMAP_MESHTASTIC_BIN", default_value = "meshtastic")]
    pub meshtastic_bin: String,

    /// Upper bound for each invocation of the mesh tool.
    #[arg(long, env = "MESHMAP_COMMAND_TIMEOUT_SECS", default_value_t = 30)]
    pub command_timeout_secs: u64,

    /// Map center used when the gateway does not report a position.
    #[arg(long, env = "MESHMAP_DEFAULT_LAT", default_value_t = 48.2082, allow_negative_numbers = true)]
    pub default_lat: f64,

    #[arg(long, env = "MESHMAP_DEFAULT_LON", default_value_t = 16.3738, allow_negative_numbers = true)]
    pub default_lon: f64,

    #[arg(long, env = "MESHMAP_ZOOM", default_value_t = 13)]
    pub zoom: u8,

    /// `text` or `json`.
    #[arg(long, env = "MESHMAP_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// OTLP/HTTP endpoint for exporting traces.
    #[arg(long, env = "MESHMAP_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Bearer token for the OTLP endpoint.
    #[arg(long, env = "MESHMAP_OTLP_TOKEN")]
    pub otlp_token: Option<String>,
}
