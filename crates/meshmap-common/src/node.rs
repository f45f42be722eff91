use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HopsAway {
    Hops(i64),
    /// The mesh tool could not hop-count the node.
    Unknown,
}

impl HopsAway {
    pub fn is_zero_or_unknown(self) -> bool {
        matches!(self, HopsAway::Hops(0) | HopsAway::Unknown)
    }
}

impl std::fmt::Display for HopsAway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HopsAway::Hops(n) => write!(f, "{n}"),
            HopsAway::Unknown => write!(f, "unknown"),
        }
    }
}

/// Decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One mesh node as reported by the node listing, after normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    pub name: String,

    /// SNR in dB.
    pub signal_quality: Option<f64>,
    pub last_heard_secs: u64,
    pub hops_away: HopsAway,

    /// `None` unless both axes were reported and parsed.
    pub coordinates: Option<Coordinates>,
}
