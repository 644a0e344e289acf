//! The per-symbol metadata record.
//!
//! Yahoo spreads a ticker's metadata across several quoteSummary modules. The
//! record produced here is the union of those modules, flattened into one
//! object keyed by the provider's own camelCase field names.

mod flatten;

use crate::core::{FetchError, YahooClient, quotesummary};
use serde_json::{Map, Value};

/// quoteSummary modules merged into the record.
const INFO_MODULES: &str =
    "quoteType,assetProfile,summaryDetail,price,defaultKeyStatistics,financialData";

/// Fetches the metadata record for `symbol`.
///
/// Numeric fields arrive from Yahoo wrapped as `{"raw": 1.23, "fmt": "1.23"}`;
/// they are collapsed to their raw values. Fields that occur in more than one
/// module (e.g. `currency`) keep the last module's value.
///
/// # Errors
///
/// Returns an error if the request fails, the response cannot be decoded, or
/// the provider reports no data for the symbol.
pub async fn fetch_info(
    client: &YahooClient,
    symbol: &str,
) -> Result<Map<String, Value>, FetchError> {
    let result = quotesummary::fetch_result(client, symbol, INFO_MODULES).await?;

    let Value::Object(modules) = result else {
        return Err(FetchError::Data("quoteSummary result is not an object".into()));
    };

    let mut record = Map::new();
    for (_module, fields) in modules {
        // Modules missing for a symbol come back as null; skip them.
        if let Value::Object(fields) = flatten::simplify(fields) {
            record.extend(fields);
        }
    }

    if record.is_empty() {
        return Err(FetchError::Data(format!("no metadata returned for {symbol}")));
    }

    Ok(record)
}
