//! Replace-or-insert merge of attendance edits.
//!
//! Records are keyed by [`AttendanceKey`]. An edit whose key already exists
//! overwrites that record's status in place; any other edit is appended.
//! Existing order is preserved and the result holds at most one record per
//! key, so applying the same batch twice gives the same set as applying it
//! once.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{AttendanceKey, AttendanceRecord, AttendanceStatus};

/// Merge `edits` into `existing`, last write wins per key.
///
/// If `existing` holds duplicate keys they collapse into the first
/// occurrence's position, carrying the last occurrence's status, before
/// edits are applied.
#[must_use]
pub fn merge_records(
    existing: &[AttendanceRecord],
    edits: &[AttendanceRecord],
) -> Vec<AttendanceRecord> {
    let mut merged: Vec<AttendanceRecord> = Vec::with_capacity(existing.len() + edits.len());
    let mut index: HashMap<AttendanceKey, usize> = HashMap::with_capacity(merged.capacity());

    for record in existing {
        let key = record.key();
        match index.get(&key) {
            Some(&slot) => merged[slot].status = record.status.clone(),
            None => {
                index.insert(key, merged.len());
                merged.push(record.clone());
            }
        }
    }

    for edit in edits {
        let key = edit.key();
        match index.get(&key) {
            Some(&slot) => merged[slot].status = edit.status.clone(),
            None => {
                index.insert(key, merged.len());
                merged.push(edit.clone());
            }
        }
    }

    merged
}

/// Merge a batch of `(student_id, status)` edits for a single `date`.
#[must_use]
pub fn merge_attendance(
    existing: &[AttendanceRecord],
    date: NaiveDate,
    edits: &[(String, AttendanceStatus)],
) -> Vec<AttendanceRecord> {
    let edits: Vec<AttendanceRecord> = edits
        .iter()
        .map(|(id, status)| AttendanceRecord::new(date, id.clone(), status.clone()))
        .collect();
    merge_records(existing, &edits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_date;

    fn rec(date: &str, id: &str, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord::new(parse_date(date).unwrap(), id, status)
    }

    fn edit(id: &str, status: AttendanceStatus) -> (String, AttendanceStatus) {
        (id.to_string(), status)
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            rec("2025-01-01", "S001", AttendanceStatus::Present),
            rec("2025-01-01", "S002", AttendanceStatus::Absent),
            rec("2025-01-02", "S001", AttendanceStatus::Present),
        ]
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let day = parse_date("2025-01-01").unwrap();
        let merged = merge_attendance(&sample(), day, &[edit("S002", AttendanceStatus::Present)]);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[1], rec("2025-01-01", "S002", AttendanceStatus::Present));
        assert_eq!(merged[0], sample()[0]);
        assert_eq!(merged[2], sample()[2]);
    }

    #[test]
    fn test_new_keys_are_appended() {
        let day = parse_date("2025-01-03").unwrap();
        let merged = merge_attendance(
            &sample(),
            day,
            &[
                edit("S002", AttendanceStatus::Absent),
                edit("S001", AttendanceStatus::Present),
            ],
        );

        assert_eq!(merged.len(), 5);
        assert_eq!(&merged[..3], &sample()[..]);
        assert_eq!(merged[3], rec("2025-01-03", "S002", AttendanceStatus::Absent));
        assert_eq!(merged[4], rec("2025-01-03", "S001", AttendanceStatus::Present));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let day = parse_date("2025-01-01").unwrap();
        let batch = [
            edit("S001", AttendanceStatus::Absent),
            edit("S003", AttendanceStatus::Present),
        ];

        let once = merge_attendance(&sample(), day, &batch);
        let twice = merge_attendance(&once, day, &batch);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_last_edit_in_batch_wins() {
        let day = parse_date("2025-01-05").unwrap();
        let merged = merge_attendance(
            &[],
            day,
            &[
                edit("S001", AttendanceStatus::Present),
                edit("S001", AttendanceStatus::Absent),
            ],
        );
        assert_eq!(merged, vec![rec("2025-01-05", "S001", AttendanceStatus::Absent)]);
    }

    #[test]
    fn test_existing_duplicates_keep_last_status() {
        let existing = vec![
            rec("2025-01-01", "S001", AttendanceStatus::Present),
            rec("2025-01-01", "S002", AttendanceStatus::Present),
            rec("2025-01-01", "S001", AttendanceStatus::Absent),
        ];
        let merged = merge_records(&existing, &[]);
        assert_eq!(
            merged,
            vec![
                rec("2025-01-01", "S001", AttendanceStatus::Absent),
                rec("2025-01-01", "S002", AttendanceStatus::Present),
            ]
        );
    }

    #[test]
    fn test_unrelated_edit_leaves_duplicated_key_at_last_status() {
        let existing = vec![
            rec("2025-01-01", "S001", AttendanceStatus::Present),
            rec("2025-01-01", "S001", AttendanceStatus::Absent),
        ];
        let day = parse_date("2025-01-01").unwrap();
        let merged = merge_attendance(&existing, day, &[edit("S002", AttendanceStatus::Present)]);
        assert_eq!(
            merged,
            vec![
                rec("2025-01-01", "S001", AttendanceStatus::Absent),
                rec("2025-01-01", "S002", AttendanceStatus::Present),
            ]
        );
    }

    #[test]
    fn test_merge_records_across_dates() {
        let merged = merge_records(
            &sample(),
            &[
                rec("2025-01-02", "S001", AttendanceStatus::Absent),
                rec("2025-01-04", "S002", AttendanceStatus::Present),
            ],
        );
        assert_eq!(merged.len(), 4);
        assert_eq!(merged[2].status, AttendanceStatus::Absent);
        assert_eq!(merged[3].student_id, "S002");
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let day = parse_date("2025-01-01").unwrap();
        assert_eq!(merge_attendance(&sample(), day, &[]), sample());
    }
}
