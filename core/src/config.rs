use crate::{
    error::{ReportError, ReportResult},
    types::ApiId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// SQLite database holding `cb_payments`, `binlist` and `fought_cbs_followup`.
    pub db_path: String,
    /// Only payments created within this many months are reported.
    pub lookback_months: u32,
    /// Processor integration whose chargebacks are reported.
    pub recharge_api: ApiId,
    pub output_path: String,
    pub title: String,
    pub currency: String,
    /// Commit and push the generated file with git.
    pub publish: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            db_path: "chargebacks.db".into(),
            lookback_months: 6,
            recharge_api: 9,
            output_path: "chargeback_report.html".into(),
            title: "Chargeback Dashboard".into(),
            currency: "MXN".into(),
            publish: false,
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file. Missing keys take their default value.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.lookback_months == 0 {
            return Err(ReportError::InvalidConfig {
                reason: "lookback_months must be at least 1".into(),
            });
        }
        if self.output_path.trim().is_empty() {
            return Err(ReportError::InvalidConfig {
                reason: "output_path is empty".into(),
            });
        }
        if self.db_path.trim().is_empty() {
            return Err(ReportError::InvalidConfig {
                reason: "db_path is empty".into(),
            });
        }
        Ok(())
    }
}
