//! Report rows and messages of the query surface.

use serde::Serialize;
use specht::{Family, LookupRecord, Partition};

/// Printed after a numeric selection at or beyond the stored maximum.
pub const INCOMPLETE_WARNING: &str =
    "WARNING: given n is greater than or equal to maximum in database. Above list may be incomplete.";

/// Explanation for a partition with no record.
pub fn not_found(p: &Partition) -> String {
    format!(
        "No data found for {p}. Either the partition/conjugate is not 2-special or it is greater than the current maximum."
    )
}

/// A record as emitted by `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    /// The integer being partitioned.
    pub n: usize,
    /// Parts, longest first.
    pub partition: Partition,
    /// Parity bit.
    pub solution: u8,
    /// Classification, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<Family>,
}

impl Row {
    /// Builds the row of `record`, classifying it when `families` is set.
    pub fn new(record: &LookupRecord, families: bool) -> Self {
        Self {
            n: record.n,
            partition: record.partition.clone(),
            solution: record.parity.bit(),
            family: families.then(|| Family::classify(&record.partition)),
        }
    }
}

/// Text rows `(p) ⊢ n: solution s [TAG]`, partitions padded to a common
/// width.
pub fn format_rows(records: &[LookupRecord], families: bool) -> Vec<String> {
    let width = records
        .iter()
        .map(|r| r.partition.to_string().len())
        .max()
        .unwrap_or(0);
    records
        .iter()
        .map(|r| {
            let line = format!(
                "{:<width$} \u{22a2} {:>2}: solution {}",
                r.partition.to_string(),
                r.n,
                r.parity,
            );
            let label = if families {
                Family::classify(&r.partition).label()
            } else {
                ""
            };
            if label.is_empty() {
                line
            } else {
                format!("{line} {label}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use specht::Parity;

    fn record(key: &str, parity: Parity) -> LookupRecord {
        LookupRecord::new(key.parse().unwrap(), parity)
    }

    #[test]
    fn rows_are_padded() {
        let rows = format_rows(
            &[
                record("7", Parity::Odd),
                record("5,1,1", Parity::Odd),
                record("4,2,1", Parity::Even),
            ],
            true,
        );
        assert_eq!(
            rows,
            vec![
                "(7)     \u{22a2}  7: solution 1 [1D]",
                "(5,1,1) \u{22a2}  7: solution 1 [HOOK]",
                "(4,2,1) \u{22a2}  7: solution 0",
            ]
        );
    }

    #[test]
    fn rows_without_families() {
        let rows = format_rows(&[record("3,3,3", Parity::Even)], false);
        assert_eq!(rows, vec!["(3,3,3) \u{22a2}  9: solution 0"]);
        assert!(format_rows(&[], true).is_empty());
    }

    #[test]
    fn json_rows() {
        let row = Row::new(&record("3,1,1", Parity::Even), true);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"n":5,"partition":[3,1,1],"solution":0,"family":"self-conjugate"}"#
        );
        let row = Row::new(&record("3,1,1", Parity::Even), false);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"n":5,"partition":[3,1,1],"solution":0}"#
        );
    }

    #[test]
    fn not_found_message() {
        let p: Partition = "4,2,1".parse().unwrap();
        assert!(not_found(&p).starts_with("No data found for (4,2,1)."));
    }
}
