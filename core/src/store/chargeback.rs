use super::{format_date, parse_date, ChargebackStore};
use crate::{
    error::ReportResult,
    record::ChargebackRecord,
    status::RawStatus,
    types::{Amount, ApiId},
};
use chrono::NaiveDateTime;
use rusqlite::params;

/// Insert arguments for `cb_payments`.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub user_id: i64,
    pub amount: Amount,
    pub operator: Option<String>,
    pub credit_card: Option<String>,
    pub payment_date: Option<NaiveDateTime>,
    pub chargeback_received_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub recharge_api: ApiId,
}

/// Insert arguments for `fought_cbs_followup`. `status` is the raw column
/// text, e.g. `"Documents submitted"`.
#[derive(Debug, Clone)]
pub struct NewFollowup {
    pub payment_id: i64,
    pub sift_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub result_date: Option<NaiveDateTime>,
}

/// Column values as SQLite returns them, before status and date parsing.
struct RawRow {
    user_id: i64,
    amount: f64,
    operator: Option<String>,
    credit_card: Option<String>,
    card_type: Option<String>,
    bank: Option<String>,
    country: Option<String>,
    payment_date: Option<String>,
    chargeback_received_date: Option<String>,
    is_disputed: bool,
    status: Option<String>,
    submission_date: Option<String>,
    result_date: Option<String>,
}

fn raw_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        user_id: row.get(0)?,
        amount: row.get(1)?,
        operator: row.get(2)?,
        credit_card: row.get(3)?,
        card_type: row.get(4)?,
        bank: row.get(5)?,
        country: row.get(6)?,
        payment_date: row.get(7)?,
        chargeback_received_date: row.get(8)?,
        is_disputed: row.get::<_, i32>(9)? != 0,
        status: row.get(10)?,
        submission_date: row.get(11)?,
        result_date: row.get(12)?,
    })
}

impl RawRow {
    fn into_record(self) -> ReportResult<ChargebackRecord> {
        let raw_status = match self.status.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(RawStatus::from_db(s)?),
        };
        Ok(ChargebackRecord {
            user_id: self.user_id,
            amount: self.amount,
            operator: self.operator,
            credit_card: self.credit_card,
            card_type: self.card_type,
            bank: self.bank,
            country: self.country,
            payment_date: parse_date(self.payment_date.as_deref()),
            chargeback_received_date: parse_date(self.chargeback_received_date.as_deref()),
            is_disputed: self.is_disputed,
            raw_status,
            submission_date: parse_date(self.submission_date.as_deref()),
            result_date: parse_date(self.result_date.as_deref()),
        })
    }
}

impl ChargebackStore {
    // ── Chargebacks ────────────────────────────────────────────────

    /// All chargebacks of `recharge_api` created after `since`, in payment id
    /// order, joined to BIN metadata and the dispute follow-up.
    pub fn fetch_records(
        &self,
        since: NaiveDateTime,
        recharge_api: ApiId,
    ) -> ReportResult<Vec<ChargebackRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT cbs.user_id, CAST(cbs.amount AS REAL), cbs.operator, cbs.credit_card,
                    bl.type, bl.standard_bank_name, bl.country,
                    cbs.payment_date, cbs.chargeback_received_date,
                    CASE WHEN fcbs.sift_id IS NOT NULL THEN 1 ELSE 0 END,
                    fcbs.status, fcbs.created_at, fcbs.result_date
             FROM cb_payments AS cbs
             LEFT JOIN binlist AS bl
                    ON substr(cbs.credit_card, 1, 6) = bl.card_first_6
             LEFT JOIN fought_cbs_followup AS fcbs
                    ON cbs.id = fcbs.payment_id
             WHERE cbs.created_at > ?1 AND cbs.recharge_api = ?2
             ORDER BY cbs.id ASC",
        )?;
        let rows = stmt
            .query_map(params![format_date(since), recharge_api], raw_row_mapper)?
            .collect::<Result<Vec<_>, _>>()?;

        let records = rows
            .into_iter()
            .map(RawRow::into_record)
            .collect::<ReportResult<Vec<_>>>()?;
        log::info!(
            "Fetched {} chargebacks for api {} since {}",
            records.len(),
            recharge_api,
            since
        );
        Ok(records)
    }

    pub fn insert_payment(&self, p: &NewPayment) -> ReportResult<i64> {
        self.conn.execute(
            "INSERT INTO cb_payments (
                user_id, amount, operator, credit_card, payment_date,
                chargeback_received_date, created_at, recharge_api
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                p.user_id,
                p.amount,
                p.operator.as_deref(),
                p.credit_card.as_deref(),
                p.payment_date.map(format_date),
                p.chargeback_received_date.map(format_date),
                format_date(p.created_at),
                p.recharge_api,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn insert_bin(
        &self,
        card_first_6: &str,
        card_type: Option<&str>,
        bank: Option<&str>,
        country: Option<&str>,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO binlist (card_first_6, type, standard_bank_name, country)
             VALUES (?1, ?2, ?3, ?4)",
            params![card_first_6, card_type, bank, country],
        )?;
        Ok(())
    }

    pub fn insert_followup(&self, f: &NewFollowup) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO fought_cbs_followup (payment_id, sift_id, status, created_at, result_date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                f.payment_id,
                f.sift_id.as_deref(),
                f.status.as_deref(),
                f.created_at.map(format_date),
                f.result_date.map(format_date),
            ],
        )?;
        Ok(())
    }

    pub fn payment_count(&self) -> ReportResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cb_payments", [], |row| row.get(0))?;
        Ok(count)
    }
}
