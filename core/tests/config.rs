//! Configuration tests: defaults, validation and JSON loading.

use chargeback_core::{config::ReportConfig, error::ReportError};

#[test]
fn defaults_match_monthly_report() {
    let config = ReportConfig::default();
    assert_eq!(config.lookback_months, 6);
    assert_eq!(config.recharge_api, 9);
    assert_eq!(config.currency, "MXN");
    assert!(!config.publish);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_lookback_is_rejected() {
    let config = ReportConfig {
        lookback_months: 0,
        ..ReportConfig::default()
    };
    assert!(matches!(config.validate(), Err(ReportError::InvalidConfig { .. })));
}

#[test]
fn empty_output_path_is_rejected() {
    let config = ReportConfig {
        output_path: "  ".into(),
        ..ReportConfig::default()
    };
    assert!(matches!(config.validate(), Err(ReportError::InvalidConfig { .. })));
}

#[test]
fn load_fills_missing_keys_with_defaults() {
    let path = std::env::temp_dir().join(format!("cb-report-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "recharge_api": 4, "title": "Ops review" }"#).expect("write config");

    let config = ReportConfig::load(path.to_str().expect("utf-8 path")).expect("load config");
    let _ = std::fs::remove_file(&path);

    assert_eq!(config.recharge_api, 4);
    assert_eq!(config.title, "Ops review");
    assert_eq!(config.lookback_months, 6);
    assert_eq!(config.db_path, "chargebacks.db");
}

#[test]
fn load_reports_missing_file() {
    let err = ReportConfig::load("/nonexistent/report.json").expect_err("missing file");
    assert!(err.to_string().contains("Cannot read"));
}
