//! Metrics bundle: the aggregation core of the report.
//!
//! `MetricsBundle::from_records` turns a flat record slice into:
//!   1. Scalar totals and the overall success rate
//!   2. Per-status count/amount summary
//!   3. Monthly time series for each date basis (dense, never sparse)
//!   4. Top-10 operator and bank rankings (all and won-only)
//!   5. Card type, country and status distributions
//!
//! Pure: same input slice, same bundle. No clock reads.

use crate::{
    classifier::{self, Classification},
    distribution::{self, Distribution},
    record::ChargebackRecord,
    status::DisputeStatus,
    types::{Amount, MonthLabel},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

pub const RANKING_LIMIT: usize = 10;

const STATUS_COUNT: usize = DisputeStatus::ALL.len();

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Totals {
    pub total_records: usize,
    pub total_amount: Amount,
    pub disputed_count: usize,
    pub disputed_amount: Amount,
    pub won_count: usize,
    pub recovered_amount: Amount,
    pub lost_count: usize,
    pub lost_amount: Amount,
    /// Percentage of decided disputes that were won, one decimal.
    pub success_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusBucket {
    pub count: usize,
    pub amount: Amount,
}

pub type StatusSummary = BTreeMap<DisputeStatus, StatusBucket>;

/// Which record date drives monthly bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateBasis {
    Payment,
    ChargebackReceived,
    /// Submission date, falling back to payment date.
    Representative,
}

impl DateBasis {
    pub fn date_of(&self, record: &ChargebackRecord) -> Option<NaiveDateTime> {
        match self {
            Self::Payment => record.payment_date,
            Self::ChargebackReceived => record.chargeback_received_date,
            Self::Representative => classifier::representative_date(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub basis: DateBasis,
    pub months: Vec<MonthLabel>,
    /// One entry per month for every status.
    pub amount_by_status: BTreeMap<DisputeStatus, Vec<Amount>>,
    pub count_by_status: BTreeMap<DisputeStatus, Vec<usize>>,
    pub success_rate: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub name: String,
    pub count: usize,
    pub total_amount: Amount,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rankings {
    pub operators: Vec<RankingEntry>,
    pub operators_won: Vec<RankingEntry>,
    pub banks: Vec<RankingEntry>,
    pub banks_won: Vec<RankingEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsBundle {
    pub totals: Totals,
    pub status_summary: StatusSummary,
    pub payment_series: TimeSeries,
    pub chargeback_series: TimeSeries,
    pub representative_series: TimeSeries,
    pub rankings: Rankings,
    pub type_distribution: Distribution,
    pub country_distribution: Distribution,
    pub status_distribution: Distribution,
}

impl MetricsBundle {
    pub fn from_records(records: &[ChargebackRecord]) -> Self {
        let classified: Vec<(&ChargebackRecord, Classification)> = records
            .iter()
            .map(|r| (r, classifier::classify(r)))
            .collect();

        let totals = compute_totals(&classified);
        let status_summary = compute_status_summary(&classified);
        let status_distribution = distribution::status_distribution(&status_summary);

        log::debug!(
            "Aggregated {} records: {} disputed, success rate {:.1}%",
            totals.total_records,
            totals.disputed_count,
            totals.success_rate
        );

        Self {
            payment_series: time_series(&classified, DateBasis::Payment),
            chargeback_series: time_series(&classified, DateBasis::ChargebackReceived),
            representative_series: time_series(&classified, DateBasis::Representative),
            rankings: compute_rankings(records),
            type_distribution: distribution::card_type_distribution(records),
            country_distribution: distribution::country_distribution(records),
            status_distribution,
            status_summary,
            totals,
        }
    }

    pub fn series(&self, basis: DateBasis) -> &TimeSeries {
        match basis {
            DateBasis::Payment => &self.payment_series,
            DateBasis::ChargebackReceived => &self.chargeback_series,
            DateBasis::Representative => &self.representative_series,
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// `won / (won + lost) * 100`, one decimal, 0 when nothing was decided.
pub fn success_rate(won: usize, lost: usize) -> f64 {
    let decided = won + lost;
    if decided == 0 {
        return 0.0;
    }
    round_one_decimal(won as f64 / decided as f64 * 100.0)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn compute_totals(classified: &[(&ChargebackRecord, Classification)]) -> Totals {
    let mut totals = Totals {
        total_records: classified.len(),
        total_amount: 0.0,
        disputed_count: 0,
        disputed_amount: 0.0,
        won_count: 0,
        recovered_amount: 0.0,
        lost_count: 0,
        lost_amount: 0.0,
        success_rate: 0.0,
    };

    for (record, class) in classified {
        totals.total_amount += record.amount;
        if record.is_disputed {
            totals.disputed_count += 1;
            totals.disputed_amount += record.amount;
        }
        match class.status {
            DisputeStatus::Won => {
                totals.won_count += 1;
                totals.recovered_amount += record.amount;
            }
            DisputeStatus::Lost => {
                totals.lost_count += 1;
                totals.lost_amount += record.amount;
            }
            _ => {}
        }
    }

    totals.success_rate = success_rate(totals.won_count, totals.lost_count);
    totals
}

fn compute_status_summary(classified: &[(&ChargebackRecord, Classification)]) -> StatusSummary {
    let mut summary: StatusSummary = DisputeStatus::ALL
        .iter()
        .map(|s| (*s, StatusBucket::default()))
        .collect();

    for (record, class) in classified {
        let bucket = summary.entry(class.status).or_default();
        bucket.count += 1;
        bucket.amount += record.amount;
    }
    summary
}

#[derive(Default)]
struct MonthAccumulator {
    amounts: [Amount; STATUS_COUNT],
    counts: [usize; STATUS_COUNT],
}

impl MonthAccumulator {
    fn add(&mut self, status: DisputeStatus, amount: Amount) {
        let idx = status as usize;
        self.amounts[idx] += amount;
        self.counts[idx] += 1;
    }

    fn success_rate(&self) -> f64 {
        success_rate(
            self.counts[DisputeStatus::Won as usize],
            self.counts[DisputeStatus::Lost as usize],
        )
    }
}

fn time_series(classified: &[(&ChargebackRecord, Classification)], basis: DateBasis) -> TimeSeries {
    // BTreeMap keeps month labels sorted; YYYY-MM sorts chronologically.
    let mut by_month: BTreeMap<MonthLabel, MonthAccumulator> = BTreeMap::new();
    for (record, class) in classified {
        let Some(date) = basis.date_of(record) else {
            continue;
        };
        by_month
            .entry(date.format("%Y-%m").to_string())
            .or_default()
            .add(class.status, record.amount);
    }

    let mut amount_by_status: BTreeMap<DisputeStatus, Vec<Amount>> = BTreeMap::new();
    let mut count_by_status: BTreeMap<DisputeStatus, Vec<usize>> = BTreeMap::new();
    for status in DisputeStatus::ALL {
        let idx = status as usize;
        amount_by_status.insert(status, by_month.values().map(|m| m.amounts[idx]).collect());
        count_by_status.insert(status, by_month.values().map(|m| m.counts[idx]).collect());
    }

    TimeSeries {
        basis,
        success_rate: by_month.values().map(MonthAccumulator::success_rate).collect(),
        months: by_month.into_keys().collect(),
        amount_by_status,
        count_by_status,
    }
}

fn compute_rankings(records: &[ChargebackRecord]) -> Rankings {
    let won = |r: &&ChargebackRecord| classifier::display_status(r) == DisputeStatus::Won;
    let operator = |r: &ChargebackRecord| r.operator.clone();
    let bank = |r: &ChargebackRecord| r.bank.clone();

    Rankings {
        operators: rank_by(records.iter(), operator),
        operators_won: rank_by(records.iter().filter(won), operator),
        banks: rank_by(records.iter(), bank),
        banks_won: rank_by(records.iter().filter(won), bank),
    }
}

/// Group by `key`, sort by count descending then name ascending, keep the
/// first `RANKING_LIMIT`. Records without a key are not ranked.
fn rank_by<'a, I, F>(records: I, key: F) -> Vec<RankingEntry>
where
    I: Iterator<Item = &'a ChargebackRecord>,
    F: Fn(&ChargebackRecord) -> Option<String>,
{
    let mut groups: BTreeMap<String, (usize, Amount)> = BTreeMap::new();
    for record in records {
        if let Some(name) = key(record) {
            let entry = groups.entry(name).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += record.amount;
        }
    }

    let mut entries: Vec<RankingEntry> = groups
        .into_iter()
        .map(|(name, (count, total_amount))| RankingEntry {
            name,
            count,
            total_amount,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(RANKING_LIMIT);
    entries
}
