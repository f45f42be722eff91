use serde::{Deserialize, Serialize};

use crate::node::Node;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Red,
    Yellow,
    Green,
    /// No signal quality reported.
    Gray,
}

impl QualityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Red => "red",
            QualityTier::Yellow => "yellow",
            QualityTier::Green => "green",
            QualityTier::Gray => "gray",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tertile cut points over the SNR samples of one node set. Only meaningful
/// relative to that set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct QualityThresholds {
    pub lower: f64,
    pub upper: f64,
}

impl QualityThresholds {
    /// Rank-based split: `lower` is the sample at index `n/3`, `upper` the one
    /// at `2n/3` of the ascending order. With one sample both equal it; with
    /// none both are zero.
    pub fn from_samples(mut samples: Vec<f64>) -> Self {
        samples.sort_by(f64::total_cmp);
        let n = samples.len();
        match n {
            0 => Self::default(),
            1 => Self {
                lower: samples[0],
                upper: samples[0],
            },
            _ => Self {
                lower: samples[n / 3],
                upper: samples[2 * n / 3],
            },
        }
    }

    pub fn from_nodes(nodes: &[Node]) -> Self {
        Self::from_samples(nodes.iter().filter_map(|n| n.signal_quality).collect())
    }

    /// Both bounds are inclusive. When `lower == upper` the red check runs
    /// first and wins.
    pub fn tier(&self, signal_quality: Option<f64>) -> QualityTier {
        match signal_quality {
            None => QualityTier::Gray,
            Some(snr) if snr <= self.lower => QualityTier::Red,
            Some(snr) if snr >= self.upper => QualityTier::Green,
            Some(_) => QualityTier::Yellow,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub thresholds: QualityThresholds,
    /// One tier per input node, same order.
    pub tiers: Vec<QualityTier>,
}

pub fn classify(nodes: &[Node]) -> Classification {
    let thresholds = QualityThresholds::from_nodes(nodes);
    let tiers = nodes
        .iter()
        .map(|n| thresholds.tier(n.signal_quality))
        .collect();
    Classification { thresholds, tiers }
}
