//! The flat chargeback record produced by the store.

use crate::{
    status::RawStatus,
    types::Amount,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One payment that received a chargeback, joined to its BIN metadata and,
/// when the merchant fought it, to the dispute follow-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargebackRecord {
    pub user_id: i64,
    pub amount: Amount,
    pub operator: Option<String>,
    pub credit_card: Option<String>,
    pub card_type: Option<String>,
    pub bank: Option<String>,
    pub country: Option<String>,
    pub payment_date: Option<NaiveDateTime>,
    pub chargeback_received_date: Option<NaiveDateTime>,
    pub is_disputed: bool,
    pub raw_status: Option<RawStatus>,
    pub submission_date: Option<NaiveDateTime>,
    pub result_date: Option<NaiveDateTime>,
}

impl ChargebackRecord {
    /// A bare, undisputed record. Remaining fields are filled with the
    /// `with_*` builders.
    pub fn new(user_id: i64, amount: Amount) -> Self {
        Self {
            user_id,
            amount,
            operator: None,
            credit_card: None,
            card_type: None,
            bank: None,
            country: None,
            payment_date: None,
            chargeback_received_date: None,
            is_disputed: false,
            raw_status: None,
            submission_date: None,
            result_date: None,
        }
    }

    pub fn with_operator(mut self, operator: &str) -> Self {
        self.operator = Some(operator.to_string());
        self
    }

    pub fn with_card(mut self, credit_card: &str, card_type: &str) -> Self {
        self.credit_card = Some(credit_card.to_string());
        self.card_type = Some(card_type.to_string());
        self
    }

    pub fn with_card_type(mut self, card_type: Option<&str>) -> Self {
        self.card_type = card_type.map(str::to_string);
        self
    }

    pub fn with_bank(mut self, bank: &str) -> Self {
        self.bank = Some(bank.to_string());
        self
    }

    pub fn with_country(mut self, country: Option<&str>) -> Self {
        self.country = country.map(str::to_string);
        self
    }

    pub fn with_payment_date(mut self, date: NaiveDateTime) -> Self {
        self.payment_date = Some(date);
        self
    }

    pub fn with_chargeback_received(mut self, date: NaiveDateTime) -> Self {
        self.chargeback_received_date = Some(date);
        self
    }

    /// Mark the record as fought, with an optional outcome.
    pub fn disputed(mut self, status: Option<RawStatus>) -> Self {
        self.is_disputed = true;
        self.raw_status = status;
        self
    }

    pub fn with_submission(mut self, date: NaiveDateTime) -> Self {
        self.submission_date = Some(date);
        self
    }

    pub fn with_result(mut self, date: NaiveDateTime) -> Self {
        self.result_date = Some(date);
        self
    }
}
