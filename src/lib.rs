//! stock-info: concurrent batch fetcher for Yahoo Finance metadata.
//!
//! Fans out over a list of ticker symbols, fetches each symbol's company
//! metadata (and its most recent dividend payments) through a shared
//! [`YahooClient`], and collects the per-symbol outcomes into a single JSON
//! object keyed by symbol. A failing symbol becomes an `{"error": ...}` entry
//! in that object; it never aborts the rest of the batch.

pub mod batch;
pub mod core;
pub mod dividends;
pub mod info;

pub use batch::{BatchBuilder, Outcome, ResultMap};
pub use core::{FetchError, YahooClient, YahooClientBuilder};
