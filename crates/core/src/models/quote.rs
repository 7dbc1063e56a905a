use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single cryptocurrency quote: a ticker symbol paired with its USD price
/// at fetch time.
///
/// Validated once at the ingestion boundary (non-empty symbol, non-negative
/// price) and never re-validated downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Provider-assigned identifier (e.g., CoinMarketCap numeric id as text).
    pub id: String,

    /// Ticker symbol, unique within one fetch (e.g., "BTC", "ETH").
    pub symbol: String,

    /// Spot price in USD. Non-negative.
    pub usd_price: f64,
}

impl Quote {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, usd_price: f64) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            usd_price,
        }
    }
}

/// The latest fetched quote snapshot plus a derived symbol → USD price index.
///
/// The snapshot is replaced wholesale on every fetch cycle; there is no
/// incremental update. The index keys are exactly the symbols present in the
/// latest fetch. If a fetch ever contains a duplicate symbol, the last record
/// wins.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
    prices: HashMap<String, f64>,
    fetched_at: Option<DateTime<Utc>>,
}

impl QuoteBook {
    pub fn new(quotes: Vec<Quote>, fetched_at: DateTime<Utc>) -> Self {
        let prices = quotes
            .iter()
            .map(|q| (q.symbol.clone(), q.usd_price))
            .collect();
        Self {
            quotes,
            prices,
            fetched_at: Some(fetched_at),
        }
    }

    /// An empty book, as before the first fetch. All lookups miss.
    pub fn empty() -> Self {
        Self::default()
    }

    /// USD price of a symbol, or `None` if the symbol was absent from the
    /// latest fetch.
    #[must_use]
    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    /// All quotes of the latest fetch, in fetch order.
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Symbols of the latest fetch, in fetch order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.iter().map(|q| q.symbol.as_str())
    }

    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    /// When the snapshot was fetched; `None` for an empty book.
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
