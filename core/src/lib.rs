//! Chargeback report core.
//!
//! Pipeline (single-threaded, one pass per run):
//!   1. store: fetch chargeback records from SQLite
//!   2. classifier: derive status and representative date per record
//!   3. aggregator: metrics bundle, run on all and on disputed records
//!   4. display: table rows and filter values
//!   5. html: render the self-contained report

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod demo;
pub mod display;
pub mod distribution;
pub mod error;
pub mod html;
pub mod record;
pub mod report;
pub mod rng;
pub mod status;
pub mod store;
pub mod types;
