//! Tab-separated clipboard text → segments.
//!
//! Each non-blank line is split on tabs; the first four fields are
//! `x1, y1, x2, y2`. Lines with fewer than four fields, or whose fields do not
//! parse as finite numbers, are skipped.

use shared::Segment;

/// Outcome of parsing a pasted block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasteSummary {
    pub segments: Vec<Segment>,
    /// Non-blank lines that were dropped.
    pub skipped: usize,
}

fn parse_field(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_row(line: &str) -> Option<Segment> {
    let mut columns = line.split('\t');
    let x1 = parse_field(columns.next()?)?;
    let y1 = parse_field(columns.next()?)?;
    let x2 = parse_field(columns.next()?)?;
    let y2 = parse_field(columns.next()?)?;
    Some(Segment::from_coords(x1, y1, x2, y2))
}

/// Parse spreadsheet-style text (`\r\n`, `\r` or `\n` line breaks).
pub fn parse_tab_separated(text: &str) -> PasteSummary {
    let mut summary = PasteSummary::default();

    for (i, line) in text.split(['\r', '\n']).enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line) {
            Some(segment) => summary.segments.push(segment),
            None => {
                tracing::debug!("paste: skipping line {}: {:?}", i, line);
                summary.skipped += 1;
            }
        }
    }

    summary
}
