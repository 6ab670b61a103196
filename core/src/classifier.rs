//! Derives the normalized status and bucketing date of a record.
//!
//! Pure and infallible: missing fields propagate as `None`.

use crate::{
    record::ChargebackRecord,
    status::DisputeStatus,
};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: DisputeStatus,
    /// Submission date when the dispute was fought, payment date otherwise.
    pub representative_date: Option<NaiveDateTime>,
}

pub fn classify(record: &ChargebackRecord) -> Classification {
    Classification {
        status: display_status(record),
        representative_date: representative_date(record),
    }
}

pub fn display_status(record: &ChargebackRecord) -> DisputeStatus {
    match record.raw_status {
        Some(raw) => raw.into(),
        None if record.is_disputed => DisputeStatus::DisputedNoOutcome,
        None => DisputeStatus::NotDisputed,
    }
}

pub fn representative_date(record: &ChargebackRecord) -> Option<NaiveDateTime> {
    record.submission_date.or(record.payment_date)
}
