//! The fan-out/fan-in batch runner.
//!
//! One worker per input symbol, run concurrently against a shared client and
//! collected into per-index slots, so the output object carries its keys in
//! input order regardless of completion order. A failure in one worker is
//! converted into that symbol's `{"error": ...}` entry and never disturbs
//! the others.

use crate::core::{FetchError, YahooClient};
use crate::{dividends, info};
use futures::StreamExt;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::error;

/// Upper bound on in-flight fetches, independent of batch size.
pub const MAX_CONCURRENT_FETCHES: usize = 8;

/// Overall wall-clock budget for a batch unless overridden.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(120);

/// Dividend payments attached to each record under `last_4_dividends`.
const DIVIDEND_COUNT: usize = 4;

/// The final JSON object: one entry per distinct input symbol, in input order.
pub type ResultMap = Map<String, Value>;

/// The per-symbol result: the fetched record, or an error descriptor.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The provider metadata record (with `last_4_dividends` when enabled).
    Data(Map<String, Value>),
    /// A contained failure, reported as data.
    Error {
        /// Human-readable message; transport failures carry an `HTTPError: ` prefix.
        error: String,
    },
}

impl From<Outcome> for Value {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Data(record) => Value::Object(record),
            Outcome::Error { error } => {
                let mut entry = Map::new();
                entry.insert("error".into(), Value::String(error));
                Value::Object(entry)
            }
        }
    }
}

/// Builds and runs one batch of symbol fetches.
///
/// # Example
///
/// ```no_run
/// # use stock_info::{BatchBuilder, YahooClient};
/// # #[tokio::main]
/// # async fn main() {
/// let client = YahooClient::default();
/// let results = BatchBuilder::new(&client, ["AAPL", "MSFT"]).fetch().await;
/// println!("{}", serde_json::to_string(&results).unwrap());
/// # }
/// ```
pub struct BatchBuilder {
    client: YahooClient,
    symbols: Vec<String>,
    include_dividends: bool,
    deadline: Duration,
}

impl BatchBuilder {
    /// Creates a batch over `symbols`. Duplicates are fetched independently;
    /// the output keeps one key per distinct symbol.
    pub fn new<I, S>(client: &YahooClient, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client: client.clone(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            include_dividends: true,
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Whether each record is augmented with its most recent dividend
    /// payments. Enabled by default.
    #[must_use]
    pub const fn dividends(mut self, include: bool) -> Self {
        self.include_dividends = include;
        self
    }

    /// Overrides the overall batch deadline. Symbols still in flight when it
    /// elapses yield error entries instead of hanging the batch.
    #[must_use]
    pub const fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Runs the batch to completion and assembles the result object.
    ///
    /// This never fails: every per-symbol error is contained in its entry,
    /// and the returned object is well-formed even if every fetch failed.
    pub async fn fetch(self) -> ResultMap {
        let Self {
            client,
            symbols,
            include_dividends,
            deadline,
        } = self;
        let deadline = tokio::time::Instant::now() + deadline;

        let mut slots: Vec<Option<Outcome>> = vec![None; symbols.len()];
        {
            let workers = symbols.iter().cloned().enumerate().map(|(slot, symbol)| {
                let client = client.clone();
                async move {
                    let fetched = tokio::time::timeout_at(
                        deadline,
                        fetch_one(&client, &symbol, include_dividends),
                    )
                    .await;
                    let outcome = match fetched {
                        Ok(Ok(record)) => Outcome::Data(record),
                        Ok(Err(err)) => report_failure(&symbol, &err),
                        Err(_) => report_failure(&symbol, &FetchError::Deadline(symbol.clone())),
                    };
                    (slot, outcome)
                }
            });

            let mut stream = futures::stream::iter(workers).buffer_unordered(MAX_CONCURRENT_FETCHES);
            while let Some((slot, outcome)) = stream.next().await {
                slots[slot] = Some(outcome);
            }
        }

        // Fold slots back in input order; a duplicate symbol keeps the first
        // occurrence's position and the last occurrence's value.
        let mut results = ResultMap::new();
        for (symbol, outcome) in symbols.into_iter().zip(slots) {
            let Some(outcome) = outcome else { continue };
            results.insert(symbol, Value::from(outcome));
        }
        results
    }
}

/// One worker body: the metadata record, plus recent dividends when enabled.
/// A dividend failure fails the symbol as a whole.
async fn fetch_one(
    client: &YahooClient,
    symbol: &str,
    include_dividends: bool,
) -> Result<Map<String, Value>, FetchError> {
    if symbol.trim().is_empty() {
        return Err(FetchError::InvalidSymbol(symbol.to_string()));
    }

    let mut record = info::fetch_info(client, symbol).await?;

    if include_dividends {
        let payments = dividends::fetch_last_dividends(client, symbol, DIVIDEND_COUNT).await?;
        record.insert("last_4_dividends".into(), Value::Object(payments));
    }

    Ok(record)
}

/// Emit one stderr diagnostic and convert the failure into its JSON entry.
fn report_failure(symbol: &str, err: &FetchError) -> Outcome {
    let error = if err.is_transport() {
        error!(symbol, error = %err, detail = ?err, "http error while fetching symbol");
        format!("HTTPError: {err}")
    } else {
        error!(symbol, error = %err, detail = ?err, "error while fetching symbol");
        err.to_string()
    };
    Outcome::Error { error }
}
