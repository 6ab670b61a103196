//! Report assembly and HTML rendering tests.

use chargeback_core::{
    error::ReportResult,
    html::{format_money, html_escape, render_report, RenderOptions},
    record::ChargebackRecord,
    report::Report,
    status::{DisputeStatus, RawStatus},
};
use chrono::{NaiveDate, NaiveDateTime};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid date")
}

fn records() -> Vec<ChargebackRecord> {
    vec![
        ChargebackRecord::new(1, 100.0)
            .with_operator("Telcel")
            .with_payment_date(dt(2025, 1, 4))
            .disputed(Some(RawStatus::Won)),
        ChargebackRecord::new(2, 40.0)
            .with_operator("<script>alert(1)</script>")
            .with_payment_date(dt(2025, 2, 4))
            .disputed(Some(RawStatus::Accepted)),
        ChargebackRecord::new(3, 10.0)
            .with_operator("Bait")
            .with_payment_date(dt(2025, 2, 9)),
        ChargebackRecord::new(4, 5.0).with_payment_date(dt(2025, 3, 9)),
    ]
}

fn options() -> RenderOptions {
    RenderOptions {
        title: "Chargebacks & Disputes".into(),
        currency: "MXN".into(),
        generated_at: "17/10/2026 09:00".into(),
    }
}

#[test]
fn disputed_bundle_covers_only_disputed_records() {
    let report = Report::build(&records());

    assert_eq!(report.all.totals.total_records, 4);
    assert_eq!(report.disputed.totals.total_records, 2);
    assert_eq!(report.disputed.totals.total_amount, 140.0);
    assert_eq!(report.disputed.status_summary[&DisputeStatus::NotDisputed].count, 0);
    assert_eq!(report.all.totals.success_rate, report.disputed.totals.success_rate);
    assert_eq!(report.rows.len(), 4);
    assert_eq!(report.statuses.len(), 6);
}

#[test]
fn report_serializes_with_status_keys() -> ReportResult<()> {
    let report = Report::build(&records());
    let json = report.to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    assert_eq!(value["all"]["totals"]["total_records"], 4);
    assert_eq!(value["all"]["status_summary"]["won"]["count"], 1);
    assert_eq!(
        value["all"]["payment_series"]["count_by_status"]["lost"],
        serde_json::json!([0, 1, 0])
    );
    assert_eq!(value["statuses"][1]["key"], "lost");
    Ok(())
}

#[test]
fn html_is_self_contained_and_escaped() -> ReportResult<()> {
    let report = Report::build(&records());
    let html = render_report(&report, &options())?;

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Chargebacks &amp; Disputes</title>"));
    assert!(html.contains("Generated 17/10/2026 09:00"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>alert(1)</script>"));
    // Embedded JSON cannot terminate the inline script.
    assert!(html.contains(r"<\/script>"));
    assert!(html.contains("const DATA = {"));
    assert_eq!(html.matches("<tr data-operator=").count(), 4);
    Ok(())
}

#[test]
fn html_filters_list_observed_values() -> ReportResult<()> {
    let report = Report::build(&records());
    let html = render_report(&report, &options())?;

    assert!(html.contains(r#"<option value="Telcel">Telcel</option>"#));
    assert!(html.contains(r#"<option value="Bait">Bait</option>"#));
    assert!(html.contains(r#"<option value="Won">Won</option>"#));
    assert!(html.contains(r#"<option value="Not disputed">Not disputed</option>"#));
    Ok(())
}

#[test]
fn empty_record_set_still_renders() -> ReportResult<()> {
    let report = Report::build(&[]);
    let html = render_report(&report, &options())?;

    assert!(html.contains("0 records"));
    assert_eq!(report.disputed.totals.total_records, 0);
    Ok(())
}

#[test]
fn money_and_escape_helpers() {
    assert_eq!(format_money(1234567.891, "MXN"), "MXN 1,234,567.89");
    assert_eq!(format_money(999.5, "USD"), "USD 999.50");
    assert_eq!(format_money(-1000.0, "MXN"), "MXN -1,000.00");
    assert_eq!(format_money(0.0, "MXN"), "MXN 0.00");
    assert_eq!(html_escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&#39;");
}
