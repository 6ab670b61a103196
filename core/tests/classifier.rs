//! Classifier tests: derived status and representative date.

use chargeback_core::{
    classifier::{classify, display_status, representative_date},
    record::ChargebackRecord,
    status::{DisputeStatus, RawStatus},
};
use chrono::{NaiveDate, NaiveDateTime};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid date")
}

#[test]
fn raw_status_maps_to_display_status() {
    let cases = [
        (RawStatus::Won, DisputeStatus::Won),
        (RawStatus::Accepted, DisputeStatus::Lost),
        (RawStatus::DocumentsSubmitted, DisputeStatus::DocumentsSubmitted),
        (RawStatus::Active, DisputeStatus::Active),
    ];
    for (raw, expected) in cases {
        let record = ChargebackRecord::new(1, 10.0).disputed(Some(raw));
        assert_eq!(display_status(&record), expected, "raw {raw:?}");
    }
}

#[test]
fn missing_status_splits_on_disputed_flag() {
    let fought = ChargebackRecord::new(1, 10.0).disputed(None);
    let not_fought = ChargebackRecord::new(2, 10.0);

    assert_eq!(display_status(&fought), DisputeStatus::DisputedNoOutcome);
    assert_eq!(display_status(&not_fought), DisputeStatus::NotDisputed);
}

#[test]
fn representative_date_prefers_submission() {
    let record = ChargebackRecord::new(1, 10.0)
        .with_payment_date(dt(2025, 1, 5))
        .disputed(Some(RawStatus::Active))
        .with_submission(dt(2025, 3, 1));

    assert_eq!(representative_date(&record), Some(dt(2025, 3, 1)));
}

#[test]
fn representative_date_falls_back_to_payment() {
    let record = ChargebackRecord::new(1, 10.0).with_payment_date(dt(2025, 1, 5));
    assert_eq!(representative_date(&record), Some(dt(2025, 1, 5)));

    let dateless = ChargebackRecord::new(2, 10.0);
    assert_eq!(representative_date(&dateless), None);
}

#[test]
fn classify_combines_both_derivations() {
    let record = ChargebackRecord::new(1, 10.0)
        .with_payment_date(dt(2025, 2, 2))
        .disputed(None);
    let class = classify(&record);

    assert_eq!(class.status, DisputeStatus::DisputedNoOutcome);
    assert_eq!(class.representative_date, Some(dt(2025, 2, 2)));
}

#[test]
fn status_style_table_is_complete_and_ordered() {
    let table = DisputeStatus::style_table();
    assert_eq!(table.len(), 6);
    let keys: Vec<&str> = table.iter().map(|s| s.key).collect();
    assert_eq!(
        keys,
        vec!["won", "lost", "documents_submitted", "active", "disputed_no_outcome", "not_disputed"]
    );
    assert!(table.iter().all(|s| s.color.starts_with('#') && s.background.starts_with('#')));
}

#[test]
fn raw_status_parses_database_values() {
    assert_eq!(RawStatus::from_db("Won").ok(), Some(RawStatus::Won));
    assert_eq!(
        RawStatus::from_db("Documents submitted").ok(),
        Some(RawStatus::DocumentsSubmitted)
    );
    assert!(RawStatus::from_db("Pending review").is_err());
}
