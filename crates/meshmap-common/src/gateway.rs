use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::node::Coordinates;

/// What the gateway reports about itself via `meshtastic --info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GatewayInfo {
    pub owner: Option<String>,
    /// Set only when both latitude and longitude were found.
    pub position: Option<Coordinates>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid {field} value '{value}'")]
    InvalidCoordinate { field: &'static str, value: String },
}

fn owner_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Owner: (.+)").expect("static regex"))
}

fn latitude_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""latitude":\s*(-?[\d.]+)"#).expect("static regex"))
}

fn longitude_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#""longitude":\s*(-?[\d.]+)"#).expect("static regex"))
}

fn capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

fn parse_axis(field: &'static str, value: &str) -> Result<f64, ExtractError> {
    value
        .parse::<f64>()
        .map_err(|_| ExtractError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

/// Strict extraction: a matched but unparseable coordinate is an error.
pub fn try_extract_gateway_info(text: &str) -> Result<GatewayInfo, ExtractError> {
    let owner = capture(owner_re(), text).map(|s| s.trim_end().to_string());

    let position = match (capture(latitude_re(), text), capture(longitude_re(), text)) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(
            parse_axis("latitude", lat)?,
            parse_axis("longitude", lon)?,
        )),
        _ => None,
    };

    Ok(GatewayInfo { owner, position })
}

/// Never fails: any extraction error yields an entirely empty [`GatewayInfo`].
pub fn extract_gateway_info(text: &str) -> GatewayInfo {
    match try_extract_gateway_info(text) {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!(error=%e, "failed to extract gateway info");
            GatewayInfo::default()
        }
    }
}
