use crate::node::{Coordinates, HopsAway, Node};
use crate::table::RawRow;

/// Placeholder the mesh tool prints for unreported values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Unit suffix on SNR cells, e.g. `5.25 dB`.
pub const SNR_UNIT_SUFFIX: &str = " dB";

pub const DEGREE_SIGN: char = '°';

/// Substring marking a hop count the tool could not determine.
pub const UNKNOWN_HOPS_MARKER: &str = "unknown";

/// Seconds assumed when the since-text cannot be read. Zero means "just
/// heard", so an unreadable timestamp never makes a node stale.
pub const LAST_HEARD_FALLBACK_SECS: u64 = 0;

/// Unit words recognised in since-text, checked in this order.
const SINCE_UNITS: [(&str, u64); 4] = [("sec", 1), ("min", 60), ("hour", 3_600), ("day", 86_400)];

/// Outcome of reading one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<T> {
    Value(T),
    Missing,
    Unparseable,
}

impl<T> FieldValue<T> {
    pub fn value(self) -> Option<T> {
        match self {
            FieldValue::Value(v) => Some(v),
            FieldValue::Missing | FieldValue::Unparseable => None,
        }
    }
}

/// SNR cell such as `5.25 dB`. Non-finite values are rejected so samples
/// always have a total order.
pub fn parse_signal_quality(cell: &str) -> FieldValue<f64> {
    if cell == NOT_AVAILABLE {
        return FieldValue::Missing;
    }
    match cell.replace(SNR_UNIT_SUFFIX, "").trim().parse::<f64>() {
        Ok(v) if v.is_finite() => FieldValue::Value(v),
        _ => FieldValue::Unparseable,
    }
}

/// Optional sign followed by at least one ASCII digit.
fn is_integer_text(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Hop count. Integers outside `i64` saturate, so they still count as
/// non-zero.
pub fn parse_hops_away(cell: &str) -> FieldValue<i64> {
    if cell.contains(UNKNOWN_HOPS_MARKER) {
        return FieldValue::Missing;
    }
    match cell.parse::<i64>() {
        Ok(n) => FieldValue::Value(n),
        Err(_) if is_integer_text(cell) => {
            FieldValue::Value(if cell.starts_with('-') { i64::MIN } else { i64::MAX })
        }
        Err(_) => FieldValue::Unparseable,
    }
}

/// Since-text such as `3 min ago` or `2 hours ago`, in seconds. Magnitudes
/// past `u64` saturate instead of wrapping to "just heard".
pub fn parse_since(cell: &str) -> FieldValue<u64> {
    let mut words = cell.split_whitespace();
    let (Some(magnitude), Some(unit)) = (words.next(), words.next()) else {
        return FieldValue::Missing;
    };

    let Some(scale) = SINCE_UNITS
        .iter()
        .find(|(word, _)| unit.contains(word))
        .map(|(_, scale)| *scale)
    else {
        return FieldValue::Unparseable;
    };

    let magnitude = match magnitude.parse::<u64>() {
        Ok(m) => m,
        Err(_) if is_integer_text(magnitude) && !magnitude.starts_with('-') => u64::MAX,
        Err(_) => return FieldValue::Unparseable,
    };
    FieldValue::Value(magnitude.saturating_mul(scale))
}

/// One coordinate axis such as `48.2082°`.
pub fn parse_coordinate(cell: &str) -> FieldValue<f64> {
    if cell == NOT_AVAILABLE {
        return FieldValue::Missing;
    }
    match cell.replace(DEGREE_SIGN, "").trim().parse::<f64>() {
        Ok(v) if v.is_finite() => FieldValue::Value(v),
        _ => FieldValue::Unparseable,
    }
}

/// Both axes or nothing.
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Option<Coordinates> {
    let lat = parse_coordinate(latitude).value()?;
    let lon = parse_coordinate(longitude).value()?;
    Some(Coordinates::new(lat, lon))
}

/// Convert one raw row into a [`Node`]. Total: every unreadable cell
/// collapses to its sentinel.
pub fn normalize_row(row: &RawRow) -> Node {
    let hops_away = match parse_hops_away(&row.hops_away) {
        FieldValue::Value(n) => HopsAway::Hops(n),
        FieldValue::Missing | FieldValue::Unparseable => HopsAway::Unknown,
    };

    Node {
        id: row.id.clone(),
        name: row.user.clone(),
        signal_quality: parse_signal_quality(&row.snr).value(),
        last_heard_secs: parse_since(&row.since)
            .value()
            .unwrap_or(LAST_HEARD_FALLBACK_SECS),
        hops_away,
        coordinates: parse_coordinates(&row.latitude, &row.longitude),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::is_direct_connection;
    use crate::table::parse_row;
    use proptest::prelude::*;

    #[test]
    fn test_parse_signal_quality() {
        assert_eq!(parse_signal_quality("5.0 dB"), FieldValue::Value(5.0));
        assert_eq!(parse_signal_quality("-7.25 dB"), FieldValue::Value(-7.25));
        assert_eq!(parse_signal_quality("12"), FieldValue::Value(12.0));
        assert_eq!(parse_signal_quality("N/A"), FieldValue::Missing);
        assert_eq!(parse_signal_quality("SNR"), FieldValue::Unparseable);
        assert_eq!(parse_signal_quality(""), FieldValue::Unparseable);
        assert_eq!(parse_signal_quality("nan dB"), FieldValue::Unparseable);
    }

    #[test]
    fn test_parse_hops_away() {
        assert_eq!(parse_hops_away("0"), FieldValue::Value(0));
        assert_eq!(parse_hops_away("3"), FieldValue::Value(3));
        assert_eq!(parse_hops_away("unknown"), FieldValue::Missing);
        assert_eq!(parse_hops_away("Hops"), FieldValue::Unparseable);
        assert_eq!(parse_hops_away(""), FieldValue::Unparseable);
        assert_eq!(parse_hops_away("-1"), FieldValue::Value(-1));
        assert_eq!(parse_hops_away("4294967296"), FieldValue::Value(4_294_967_296));
        assert_eq!(parse_hops_away("99999999999999999999"), FieldValue::Value(i64::MAX));
        assert_eq!(parse_hops_away("-99999999999999999999"), FieldValue::Value(i64::MIN));
    }

    #[test]
    fn test_odd_hop_counts_are_not_direct() {
        for hops in ["-1", "4294967296", "99999999999999999999"] {
            let row = RawRow {
                snr: "5.0 dB".to_string(),
                hops_away: hops.to_string(),
                since: "1 min ago".to_string(),
                ..RawRow::default()
            };
            let node = normalize_row(&row);
            assert_ne!(node.hops_away, HopsAway::Unknown, "hops {hops}");
            assert!(!is_direct_connection(&node), "hops {hops}");
        }
    }

    #[test]
    fn test_parse_since() {
        assert_eq!(parse_since("42 secs ago"), FieldValue::Value(42));
        assert_eq!(parse_since("3 min ago"), FieldValue::Value(180));
        assert_eq!(parse_since("2 hours ago"), FieldValue::Value(7_200));
        assert_eq!(parse_since("1 day ago"), FieldValue::Value(86_400));
        assert_eq!(parse_since("now"), FieldValue::Missing);
        assert_eq!(parse_since(""), FieldValue::Missing);
        assert_eq!(parse_since("3 weeks ago"), FieldValue::Unparseable);
        assert_eq!(parse_since("a min ago"), FieldValue::Unparseable);
        assert_eq!(parse_since("-5 min ago"), FieldValue::Unparseable);
        assert_eq!(parse_since("300000000000000 days ago"), FieldValue::Value(u64::MAX));
        assert_eq!(parse_since("99999999999999999999 days ago"), FieldValue::Value(u64::MAX));
    }

    #[test]
    fn test_huge_since_is_stale() {
        for since in ["300000000000000 days ago", "99999999999999999999 days ago"] {
            let row = RawRow {
                snr: "5.0 dB".to_string(),
                hops_away: "0".to_string(),
                since: since.to_string(),
                ..RawRow::default()
            };
            let node = normalize_row(&row);
            assert_eq!(node.last_heard_secs, u64::MAX, "since {since}");
            assert!(!is_direct_connection(&node), "since {since}");
        }
    }

    #[test]
    fn test_parse_coordinates_both_or_nothing() {
        assert_eq!(
            parse_coordinates("48.1°", "16.3°"),
            Some(Coordinates::new(48.1, 16.3))
        );
        assert_eq!(
            parse_coordinates("-33.8688°", "151.2093°"),
            Some(Coordinates::new(-33.8688, 151.2093))
        );
        assert_eq!(parse_coordinates("N/A", "16.3°"), None);
        assert_eq!(parse_coordinates("48.1°", "N/A"), None);
        assert_eq!(parse_coordinates("48.1°", "east"), None);
    }

    #[test]
    fn test_normalize_row() {
        let line = "│ 1 │ Alice │ !abc123 │ AL │ HW │ 48.1°│ 16.3° │ 200 │ 90% │ 1% │ 2% │ 5.0 dB │ 0 │ 1 │ 2024-05-01 12:00:00 │ 3 min ago │";
        let node = normalize_row(&parse_row(line).unwrap());
        assert_eq!(node.name, "Alice");
        assert_eq!(node.id, "!abc123");
        assert_eq!(node.signal_quality, Some(5.0));
        assert_eq!(node.last_heard_secs, 180);
        assert_eq!(node.hops_away, HopsAway::Hops(0));
        assert_eq!(node.coordinates, Some(Coordinates::new(48.1, 16.3)));
    }

    #[test]
    fn test_normalize_row_sentinels() {
        let row = RawRow {
            snr: "N/A".to_string(),
            hops_away: "unknown".to_string(),
            since: "garbled".to_string(),
            latitude: "N/A".to_string(),
            longitude: "N/A".to_string(),
            ..RawRow::default()
        };
        let node = normalize_row(&row);
        assert_eq!(node.id, "");
        assert_eq!(node.signal_quality, None);
        assert_eq!(node.hops_away, HopsAway::Unknown);
        assert_eq!(node.last_heard_secs, LAST_HEARD_FALLBACK_SECS);
        assert_eq!(node.coordinates, None);
    }

    proptest! {
        #[test]
        fn prop_since_scales_by_unit(
            magnitude in 0u64..1_000_000,
            unit_idx in 0usize..4,
            plural in any::<bool>(),
        ) {
            let (word, scale) = [("sec", 1u64), ("min", 60), ("hour", 3_600), ("day", 86_400)][unit_idx];
            let unit = if plural { format!("{word}s") } else { word.to_string() };
            let text = format!("{magnitude} {unit} ago");
            prop_assert_eq!(parse_since(&text), FieldValue::Value(magnitude * scale));
        }

        #[test]
        fn prop_since_other_forms_fall_back(unit in "[a-z]{1,8}", magnitude in 0u64..1000) {
            prop_assume!(!["sec", "min", "hour", "day"].iter().any(|w| unit.contains(w)));
            let row = RawRow { since: format!("{magnitude} {unit} ago"), ..RawRow::default() };
            prop_assert_eq!(normalize_row(&row).last_heard_secs, LAST_HEARD_FALLBACK_SECS);
        }
    }
}
