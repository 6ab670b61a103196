//! Report assembly: everything the presenter needs, computed once.
//!
//! The aggregation is one pure function run over two immutable inputs:
//! the full record set and its disputed subset.

use crate::{
    aggregator::MetricsBundle,
    display::{self, DisplayRow, FilterValues},
    error::ReportResult,
    record::ChargebackRecord,
    status::{DisputeStatus, StatusStyle},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub all: MetricsBundle,
    pub disputed: MetricsBundle,
    pub rows: Vec<DisplayRow>,
    pub filters: FilterValues,
    pub statuses: Vec<StatusStyle>,
}

impl Report {
    pub fn build(records: &[ChargebackRecord]) -> Self {
        let disputed: Vec<ChargebackRecord> =
            records.iter().filter(|r| r.is_disputed).cloned().collect();

        log::info!(
            "Building report from {} records ({} disputed)",
            records.len(),
            disputed.len()
        );

        Self {
            all: MetricsBundle::from_records(records),
            disputed: MetricsBundle::from_records(&disputed),
            rows: display::display_rows(records),
            filters: display::filter_values(records),
            statuses: DisputeStatus::style_table(),
        }
    }

    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
