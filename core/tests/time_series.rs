//! Monthly time series tests: bucketing, density and per-month success rate.

use chargeback_core::{
    aggregator::{DateBasis, MetricsBundle},
    record::ChargebackRecord,
    status::{DisputeStatus, RawStatus},
};
use chrono::{NaiveDate, NaiveDateTime};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(14, 0, 0))
        .expect("valid date")
}

fn records() -> Vec<ChargebackRecord> {
    vec![
        // Out of chronological order on purpose.
        ChargebackRecord::new(1, 40.0)
            .with_payment_date(dt(2025, 3, 2))
            .with_chargeback_received(dt(2025, 4, 10))
            .disputed(Some(RawStatus::Won)),
        ChargebackRecord::new(2, 60.0)
            .with_payment_date(dt(2024, 12, 30))
            .with_chargeback_received(dt(2025, 1, 25))
            .disputed(Some(RawStatus::Accepted)),
        ChargebackRecord::new(3, 25.0)
            .with_payment_date(dt(2025, 3, 28))
            .disputed(Some(RawStatus::Won)),
        ChargebackRecord::new(4, 15.0)
            .with_payment_date(dt(2025, 3, 5))
            .with_chargeback_received(dt(2025, 4, 1))
            .disputed(Some(RawStatus::Accepted)),
        ChargebackRecord::new(5, 5.0)
            .with_payment_date(dt(2025, 1, 9)),
        // No dates at all: counted in totals, absent from every series.
        ChargebackRecord::new(6, 999.0).disputed(None),
        // Submission date drives the representative basis.
        ChargebackRecord::new(7, 12.0)
            .with_payment_date(dt(2025, 1, 20))
            .disputed(Some(RawStatus::DocumentsSubmitted))
            .with_submission(dt(2025, 5, 2)),
    ]
}

#[test]
fn months_are_sorted_and_distinct() {
    let bundle = MetricsBundle::from_records(&records());
    assert_eq!(
        bundle.payment_series.months,
        vec!["2024-12", "2025-01", "2025-03"]
    );
    assert_eq!(bundle.chargeback_series.months, vec!["2025-01", "2025-04"]);
    assert_eq!(
        bundle.representative_series.months,
        vec!["2024-12", "2025-01", "2025-03", "2025-05"]
    );
}

#[test]
fn every_status_array_is_dense() {
    let bundle = MetricsBundle::from_records(&records());
    for basis in [DateBasis::Payment, DateBasis::ChargebackReceived, DateBasis::Representative] {
        let series = bundle.series(basis);
        let months = series.months.len();
        assert_eq!(series.amount_by_status.len(), DisputeStatus::ALL.len());
        assert_eq!(series.count_by_status.len(), DisputeStatus::ALL.len());
        for status in DisputeStatus::ALL {
            assert_eq!(series.amount_by_status[&status].len(), months, "{basis:?} {status:?}");
            assert_eq!(series.count_by_status[&status].len(), months, "{basis:?} {status:?}");
        }
        assert_eq!(series.success_rate.len(), months);
    }
}

#[test]
fn cells_hold_sums_and_zeros() {
    let bundle = MetricsBundle::from_records(&records());
    let s = &bundle.payment_series;

    // 2025-03: two wins (40 + 25) and one loss (15).
    assert_eq!(s.count_by_status[&DisputeStatus::Won], vec![0, 0, 2]);
    assert_eq!(s.amount_by_status[&DisputeStatus::Won], vec![0.0, 0.0, 65.0]);
    assert_eq!(s.count_by_status[&DisputeStatus::Lost], vec![1, 0, 1]);
    assert_eq!(s.amount_by_status[&DisputeStatus::NotDisputed], vec![0.0, 5.0, 0.0]);
    assert_eq!(s.count_by_status[&DisputeStatus::Active], vec![0, 0, 0]);
}

#[test]
fn monthly_success_rate_per_month() {
    let bundle = MetricsBundle::from_records(&records());

    // 2024-12: 0 won / 1 lost; 2025-01: nothing decided; 2025-03: 2 / 3.
    assert_eq!(bundle.payment_series.success_rate, vec![0.0, 0.0, 66.7]);
    // 2025-01: one loss; 2025-04: one win, one loss.
    assert_eq!(bundle.chargeback_series.success_rate, vec![0.0, 50.0]);
}

#[test]
fn records_without_basis_date_are_dropped_from_series_only() {
    let bundle = MetricsBundle::from_records(&records());
    let series_total: usize = bundle
        .payment_series
        .count_by_status
        .values()
        .map(|counts| counts.iter().sum::<usize>())
        .sum();

    assert_eq!(series_total, 6);
    assert_eq!(bundle.totals.total_records, 7);
}
