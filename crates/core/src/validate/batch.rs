use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::failed_checks_on;
use crate::expiry::local_today;
use crate::record::LabelRecord;

/// A rejected record together with why it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidLabel {
    /// The record exactly as it was submitted.
    #[serde(flatten)]
    pub label: LabelRecord,
    /// One short message per failing check, in check order.
    pub errors: Vec<String>,
}

/// A batch split into accepted and rejected records.
///
/// Every input record lands in exactly one of the two lists, and each list
/// keeps the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelPartition {
    /// Records that passed every check, unchanged.
    pub valid_labels: Vec<LabelRecord>,
    /// Records that failed at least one check.
    pub invalid_labels: Vec<InvalidLabel>,
}

impl LabelPartition {
    /// Total number of records partitioned.
    pub fn len(&self) -> usize {
        self.valid_labels.len() + self.invalid_labels.len()
    }

    /// `true` when the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when no record was rejected.
    pub fn all_valid(&self) -> bool {
        self.invalid_labels.is_empty()
    }
}

/// Partition `records` into valid and invalid labels, with `today` as the
/// reference date for expiry checks.
pub fn validate_label_list_on<I>(records: I, today: NaiveDate) -> LabelPartition
where
    I: IntoIterator<Item = LabelRecord>,
{
    let mut partition = LabelPartition::default();
    for label in records {
        let failed = failed_checks_on(&label, today);
        if failed.is_empty() {
            partition.valid_labels.push(label);
        } else {
            partition.invalid_labels.push(InvalidLabel {
                errors: failed
                    .into_iter()
                    .map(|c| c.short_message().to_string())
                    .collect(),
                label,
            });
        }
    }
    partition
}

/// Partition `records` against the local calendar date.
///
/// The date is read once, so every record of the batch is judged against
/// the same "today".
pub fn validate_label_list<I>(records: I) -> LabelPartition
where
    I: IntoIterator<Item = LabelRecord>,
{
    validate_label_list_on(records, local_today())
}
