//! Core components of the `stock-info` client.
//!
//! This module contains the foundational building blocks of the crate:
//! - The main [`YahooClient`] and its builder.
//! - The primary [`FetchError`] type.
//! - Shared networking and authentication logic used by the data modules.

/// The main client (`YahooClient`), builder, and configuration.
pub mod client;
/// The primary error type (`FetchError`) for the crate.
pub mod error;
pub(crate) mod quotesummary;

// convenient re-exports so most code can just `use crate::core::YahooClient`
pub use client::{YahooClient, YahooClientBuilder};
pub use error::FetchError;
