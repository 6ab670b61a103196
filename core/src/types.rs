//! Shared primitive types used across the report pipeline.

/// A calendar month label, formatted `YYYY-MM`.
/// Lexicographic order equals chronological order.
pub type MonthLabel = String;

/// Currency amount after normalization from the store's decimal column.
pub type Amount = f64;

/// Identifier of the payment processor integration (`recharge_api` column).
pub type ApiId = i64;
