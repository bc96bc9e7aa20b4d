//! Tab-separated output decoding.
//!
//! The external client prints a header line followed by one line per row,
//! fields separated by tabs. This module turns that text into [`Record`]s.
//!
//! The format has no escaping: a cell containing a tab or a newline cannot be
//! represented and will shift or split the row. Decoding never fails.

use crate::models::Record;
use serde_json::Value as JsonValue;

/// Header plus raw rows, as split from the client output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TabularFrame {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularFrame {
    /// Split client output into a frame. `None` means there is nothing to
    /// decode, not even a header.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let text = trim_text(text);
        if text.is_empty() {
            return None;
        }

        // `lines` accepts both "\n" and "\r\n".
        let mut lines = text.lines();
        let header = lines
            .next()?
            .split('\t')
            .map(String::from)
            .collect::<Vec<_>>();

        let rows = lines
            .map(trim_text)
            .filter(|line| !line.is_empty())
            .map(|line| line.split('\t').map(String::from).collect())
            .collect();

        Some(Self { header, rows })
    }

    /// Zip every row with the header.
    ///
    /// Short rows leave the trailing keys absent; surplus values are dropped.
    pub(crate) fn into_records(self) -> Vec<Record> {
        let Self { header, rows } = self;
        rows.into_iter()
            .map(|row| {
                let mut record = Record::new();
                for (field, value) in header.iter().zip(row) {
                    record.insert(field.clone(), JsonValue::String(value));
                }
                record
            })
            .collect()
    }
}

/// Trim whitespace and byte order marks from both ends.
///
/// `str::trim` keeps U+FEFF, which some clients emit at the start of output.
pub(crate) fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Decode raw client stdout into records.
///
/// Invalid UTF-8 sequences are replaced rather than rejected; the client writes
/// in the platform charset.
pub fn decode(bytes: &[u8]) -> Vec<Record> {
    decode_str(&String::from_utf8_lossy(bytes))
}

/// Decode client output that is already text.
pub fn decode_str(text: &str) -> Vec<Record> {
    TabularFrame::parse(text)
        .map(TabularFrame::into_records)
        .unwrap_or_default()
}
