/// Vertical bar used by the mesh tool to delimit table cells.
pub const ROW_DELIMITER: char = '│';

/// Minimum number of segments a row must split into to carry every field.
pub const MIN_COLUMNS: usize = 17;

const DIVIDER_RUN: &str = "═════";
const FOOTER_CORNER: char = '╘';

/// Trimmed cell values of one data row, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub user: String,
    pub id: String,
    pub aka: String,
    pub hardware: String,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub battery: String,
    pub channel_util: String,
    pub tx_air_util: String,
    pub snr: String,
    pub hops_away: String,
    pub channel: String,
    pub last_heard: String,
    pub since: String,
}

/// Parse the box-drawing node table printed by `meshtastic --nodes`.
///
/// Decorative lines are skipped. Rows that split into fewer than
/// [`MIN_COLUMNS`] segments (wrapped or truncated lines) are dropped, so a
/// partially garbled table still yields its well-formed rows.
pub fn parse_table(text: &str) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        if !is_data_line(line) {
            continue;
        }
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::debug!(dropped, accepted = rows.len(), "dropped malformed table rows");
    }
    rows
}

fn is_data_line(line: &str) -> bool {
    line.starts_with(ROW_DELIMITER) && !line.contains(DIVIDER_RUN) && !line.contains(FOOTER_CORNER)
}

/// Split one table line into a [`RawRow`]. Segment 0 (before the first
/// delimiter) and segment 1 (the row number) are ignored, as is anything
/// after segment 16.
pub fn parse_row(line: &str) -> Option<RawRow> {
    let parts: Vec<&str> = line.split(ROW_DELIMITER).map(|s| s.trim()).collect();
    if parts.len() < MIN_COLUMNS {
        return None;
    }

    let cell = |i: usize| parts[i].to_string();
    Some(RawRow {
        user: cell(2),
        id: cell(3),
        aka: cell(4),
        hardware: cell(5),
        latitude: cell(6),
        longitude: cell(7),
        altitude: cell(8),
        battery: cell(9),
        channel_util: cell(10),
        tx_air_util: cell(11),
        snr: cell(12),
        hops_away: cell(13),
        channel: cell(14),
        last_heard: cell(15),
        since: cell(16),
    })
}
