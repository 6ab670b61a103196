//! Categorical breakdowns rendered as donut charts.

use crate::{
    aggregator::StatusSummary,
    record::ChargebackRecord,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of countries kept before the remainder is merged into `OTHER`.
pub const COUNTRY_TOP_N: usize = 4;

pub const UNKNOWN_COUNTRY: &str = "UNKNOWN";
pub const OTHER_COUNTRY: &str = "OTHER";

/// Country colors are assigned by rank position, not by country.
const COUNTRY_PALETTE: [&str; 6] = [
    "#009FDD", "#9C27B0", "#4CAF50", "#FF9800", "#607D8B", "#E57373",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub slices: Vec<Slice>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn value_of(&self, label: &str) -> Option<usize> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slices.iter().map(|s| s.label.as_str()).collect()
    }
}

// ── Card brand ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum CardBrand {
    Visa,
    MasterCard,
    Amex,
    Other,
}

impl CardBrand {
    /// Ordered, case-insensitive substring rules. First match wins.
    pub fn classify(card_type: Option<&str>) -> Self {
        let Some(raw) = card_type else {
            return Self::Other;
        };
        let t = raw.to_lowercase();
        if t.contains("visa") {
            Self::Visa
        } else if t.contains("master") {
            Self::MasterCard
        } else if t.contains("amex") || t.contains("american") {
            Self::Amex
        } else {
            Self::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::MasterCard => "MasterCard",
            Self::Amex => "AMEX",
            Self::Other => "Other",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Visa => "#1A1F71",
            Self::MasterCard => "#EB001B",
            Self::Amex => "#002663",
            Self::Other => "#9E9E9E",
        }
    }
}

/// Count per brand, largest first. Brands with no records are omitted.
pub fn card_type_distribution(records: &[ChargebackRecord]) -> Distribution {
    let mut counts: BTreeMap<CardBrand, usize> = BTreeMap::new();
    for record in records {
        *counts
            .entry(CardBrand::classify(record.card_type.as_deref()))
            .or_insert(0) += 1;
    }

    let mut ranked: Vec<(CardBrand, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Distribution {
        slices: ranked
            .into_iter()
            .map(|(brand, value)| Slice {
                label: brand.label().to_string(),
                value,
                color: brand.color(),
            })
            .collect(),
    }
}

// ── Country ──────────────────────────────────────────────────────────────────

/// Top `COUNTRY_TOP_N` countries by count; the rest collapse into `OTHER`
/// when there are more than `COUNTRY_TOP_N` distinct countries.
pub fn country_distribution(records: &[ChargebackRecord]) -> Distribution {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let country = record
            .country
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());
        *counts.entry(country).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if ranked.len() > COUNTRY_TOP_N {
        let other: usize = ranked[COUNTRY_TOP_N..].iter().map(|(_, n)| n).sum();
        ranked.truncate(COUNTRY_TOP_N);
        ranked.push((OTHER_COUNTRY.to_string(), other));
    }

    Distribution {
        slices: ranked
            .into_iter()
            .enumerate()
            .map(|(rank, (label, value))| Slice {
                label,
                value,
                color: COUNTRY_PALETTE[rank % COUNTRY_PALETTE.len()],
            })
            .collect(),
    }
}

// ── Status ───────────────────────────────────────────────────────────────────

/// One slice per status in display order, zero counts included.
pub fn status_distribution(summary: &StatusSummary) -> Distribution {
    Distribution {
        slices: summary
            .iter()
            .map(|(status, bucket)| Slice {
                label: status.label().to_string(),
                value: bucket.count,
                color: status.color(),
            })
            .collect(),
    }
}
