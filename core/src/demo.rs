//! Synthetic chargeback data for local runs without a production replica.
//!
//! Seeding is deterministic: `(seed, count, anchor)` fully determines the
//! inserted rows. `anchor` is the newest possible payment date.

use crate::{
    error::ReportResult,
    rng::SeededRng,
    status::RawStatus,
    store::{ChargebackStore, NewFollowup, NewPayment},
    types::ApiId,
};
use chrono::{Duration, NaiveDateTime};

const DISPUTE_PROBABILITY: f64 = 0.55;
const PAYMENT_WINDOW_DAYS: u64 = 180;

const OPERATORS: [&str; 8] = [
    "Telcel", "AT&T", "Movistar", "Bait", "Unefon", "Virgin", "Weex", "Altan",
];

/// (first six digits, card type, bank, country)
const BINS: [(&str, &str, &str, &str); 8] = [
    ("411111", "visa", "BBVA Mexico", "mx"),
    ("424242", "visa debit", "Banorte", "mx"),
    ("510510", "mastercard", "Santander", "mx"),
    ("555555", "MASTERCARD CREDIT", "Banamex", "mx"),
    ("378282", "american express", "American Express", "us"),
    ("601100", "discover", "Discover Bank", "us"),
    ("400000", "visa", "Chase", "us"),
    ("520000", "mastercard", "BBVA", "es"),
];

/// Outcome weights: Won, Accepted, Documents submitted, Active, no outcome.
const OUTCOME_WEIGHTS: [f64; 5] = [0.35, 0.25, 0.20, 0.10, 0.10];

/// Insert `count` synthetic chargebacks for `recharge_api`. Returns the
/// number of payments inserted.
pub fn seed_demo_data(
    store: &ChargebackStore,
    seed: u64,
    count: usize,
    anchor: NaiveDateTime,
    recharge_api: ApiId,
) -> ReportResult<usize> {
    let mut rng = SeededRng::new(seed);

    for (first_6, card_type, bank, country) in BINS {
        store.insert_bin(first_6, Some(card_type), Some(bank), Some(country))?;
    }

    for i in 0..count {
        let payment_date = anchor - Duration::days(rng.next_u64_below(PAYMENT_WINDOW_DAYS) as i64)
            - Duration::minutes(rng.next_u64_below(24 * 60) as i64);
        let received = payment_date + Duration::days(20 + rng.next_u64_below(40) as i64);
        let chargeback_received_date = (received <= anchor).then_some(received);

        let (first_6, _, _, _) = *rng.pick(&BINS);
        let last_4 = rng.next_u64_below(10_000);
        let amount = (rng.pareto(80.0, 1.6).min(25_000.0) * 100.0).round() / 100.0;

        let payment_id = store.insert_payment(&NewPayment {
            user_id: 100_000 + rng.next_u64_below(900_000) as i64,
            amount,
            operator: rng.chance(0.97).then(|| rng.pick(&OPERATORS).to_string()),
            credit_card: Some(format!("{first_6}******{last_4:04}")),
            payment_date: Some(payment_date),
            chargeback_received_date,
            created_at: chargeback_received_date.unwrap_or(payment_date),
            recharge_api,
        })?;

        if !rng.chance(DISPUTE_PROBABILITY) {
            continue;
        }

        let status = match rng.weighted_index(&OUTCOME_WEIGHTS) {
            0 => Some(RawStatus::Won),
            1 => Some(RawStatus::Accepted),
            2 => Some(RawStatus::DocumentsSubmitted),
            3 => Some(RawStatus::Active),
            _ => None,
        };
        let submitted = chargeback_received_date
            .map(|d| d + Duration::days(1 + rng.next_u64_below(5) as i64));
        let decided = matches!(status, Some(RawStatus::Won | RawStatus::Accepted));
        let result_date = submitted
            .filter(|_| decided)
            .map(|d| d + Duration::days(15 + rng.next_u64_below(30) as i64));

        store.insert_followup(&NewFollowup {
            payment_id,
            sift_id: Some(format!("sift-{seed}-{i}")),
            status: status.map(|s| s.as_db().to_string()),
            created_at: submitted,
            result_date,
        })?;
    }

    log::info!("Seeded {count} demo chargebacks (seed {seed})");
    Ok(count)
}
