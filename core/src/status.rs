//! Dispute status vocabulary.
//!
//! `RawStatus` is what the follow-up table stores. `DisputeStatus` is the
//! closed set every record is classified into, and owns the single style
//! table (label, colors) shared by the aggregator and the HTML presenter.

use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};

/// Outcome recorded on a dispute follow-up row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawStatus {
    Won,
    /// The merchant accepted the chargeback, i.e. the dispute was lost.
    Accepted,
    DocumentsSubmitted,
    Active,
}

impl RawStatus {
    /// Parse the value stored in `fought_cbs_followup.status`.
    pub fn from_db(value: &str) -> ReportResult<Self> {
        match value.trim() {
            "Won" => Ok(Self::Won),
            "Accepted" => Ok(Self::Accepted),
            "Documents submitted" => Ok(Self::DocumentsSubmitted),
            "Active" => Ok(Self::Active),
            other => Err(ReportError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Won => "Won",
            Self::Accepted => "Accepted",
            Self::DocumentsSubmitted => "Documents submitted",
            Self::Active => "Active",
        }
    }
}

/// Normalized status of a chargeback. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    Won,
    Lost,
    DocumentsSubmitted,
    Active,
    DisputedNoOutcome,
    NotDisputed,
}

impl DisputeStatus {
    pub const ALL: [DisputeStatus; 6] = [
        Self::Won,
        Self::Lost,
        Self::DocumentsSubmitted,
        Self::Active,
        Self::DisputedNoOutcome,
        Self::NotDisputed,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Won => "won",
            Self::Lost => "lost",
            Self::DocumentsSubmitted => "documents_submitted",
            Self::Active => "active",
            Self::DisputedNoOutcome => "disputed_no_outcome",
            Self::NotDisputed => "not_disputed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::DocumentsSubmitted => "Docs Submitted",
            Self::Active => "Active",
            Self::DisputedNoOutcome => "Disputed, no outcome yet",
            Self::NotDisputed => "Not disputed",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Won => "#4CAF50",
            Self::Lost => "#FF9800",
            Self::DocumentsSubmitted => "#2196F3",
            Self::Active => "#9C27B0",
            Self::DisputedNoOutcome => "#FFC107",
            Self::NotDisputed => "#9E9E9E",
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Won => "#E8F5E9",
            Self::Lost => "#FFF3E0",
            Self::DocumentsSubmitted => "#E3F2FD",
            Self::Active => "#F3E5F5",
            Self::DisputedNoOutcome => "#FFF8E1",
            Self::NotDisputed => "#F5F5F5",
        }
    }

    pub fn style(&self) -> StatusStyle {
        StatusStyle {
            status: *self,
            key: self.key(),
            label: self.label(),
            color: self.color(),
            background: self.background(),
        }
    }

    /// The full style table in display order.
    pub fn style_table() -> Vec<StatusStyle> {
        Self::ALL.iter().map(DisputeStatus::style).collect()
    }
}

impl From<RawStatus> for DisputeStatus {
    fn from(raw: RawStatus) -> Self {
        match raw {
            RawStatus::Won => Self::Won,
            RawStatus::Accepted => Self::Lost,
            RawStatus::DocumentsSubmitted => Self::DocumentsSubmitted,
            RawStatus::Active => Self::Active,
        }
    }
}

/// One row of the status style table, as shipped to the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub status: DisputeStatus,
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub background: &'static str,
}
