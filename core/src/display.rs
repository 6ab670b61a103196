//! Per-record table rows and the values that populate the table filters.

use crate::{
    classifier,
    record::ChargebackRecord,
    status::DisputeStatus,
    types::Amount,
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeSet;

pub const MISSING_DATE: &str = "-";

/// Card fragments shorter than this are not shown.
const MIN_CARD_FRAGMENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub user_id: i64,
    pub amount: Amount,
    pub operator: String,
    pub card_fragment: String,
    pub card_type: String,
    pub bank: String,
    pub country: String,
    pub payment_date: String,
    pub payment_sort: i64,
    pub chargeback_date: String,
    pub is_disputed: bool,
    pub status: DisputeStatus,
    pub submission_date: String,
    pub submission_sort: i64,
    pub result_date: String,
    pub result_sort: i64,
}

impl DisplayRow {
    pub fn from_record(record: &ChargebackRecord) -> Self {
        let card_fragment = record
            .credit_card
            .as_deref()
            .filter(|c| c.chars().count() >= MIN_CARD_FRAGMENT)
            .unwrap_or_default()
            .to_string();

        Self {
            user_id: record.user_id,
            amount: record.amount,
            operator: text(&record.operator),
            card_fragment,
            card_type: record.card_type.as_deref().map(capitalize).unwrap_or_default(),
            bank: text(&record.bank),
            country: text(&record.country),
            payment_date: format_date(record.payment_date, "%d/%m/%Y %H:%M"),
            payment_sort: sort_key(record.payment_date),
            chargeback_date: format_date(record.chargeback_received_date, "%d/%m/%Y"),
            is_disputed: record.is_disputed,
            status: classifier::display_status(record),
            submission_date: format_date(record.submission_date, "%d/%m/%Y"),
            submission_sort: sort_key(record.submission_date),
            result_date: format_date(record.result_date, "%d/%m/%Y"),
            result_sort: sort_key(record.result_date),
        }
    }
}

/// One row per record, in source order.
pub fn display_rows(records: &[ChargebackRecord]) -> Vec<DisplayRow> {
    records.iter().map(DisplayRow::from_record).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterValues {
    pub operators: Vec<String>,
    pub card_types: Vec<String>,
    pub banks: Vec<String>,
    pub statuses: Vec<String>,
}

/// Distinct non-empty values per filter, each sorted.
pub fn filter_values(records: &[ChargebackRecord]) -> FilterValues {
    let mut operators = BTreeSet::new();
    let mut card_types = BTreeSet::new();
    let mut banks = BTreeSet::new();
    let mut statuses = BTreeSet::new();

    for record in records {
        if let Some(op) = non_empty(&record.operator) {
            operators.insert(op.to_string());
        }
        if let Some(t) = non_empty(&record.card_type) {
            card_types.insert(capitalize(t));
        }
        if let Some(bank) = non_empty(&record.bank) {
            banks.insert(bank.to_string());
        }
        statuses.insert(classifier::display_status(record).label().to_string());
    }

    FilterValues {
        operators: operators.into_iter().collect(),
        card_types: card_types.into_iter().collect(),
        banks: banks.into_iter().collect(),
        statuses: statuses.into_iter().collect(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn format_date(date: Option<NaiveDateTime>, pattern: &str) -> String {
    date.map(|d| d.format(pattern).to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

fn sort_key(date: Option<NaiveDateTime>) -> i64 {
    date.map(|d| d.and_utc().timestamp()).unwrap_or(0)
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
