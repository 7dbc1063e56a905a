use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Mutex;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration as StdDuration;

use crate::errors::CoreError;
use crate::models::quote::Quote;
use super::traits::QuoteProvider;

const LISTINGS_URL: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/listings/latest";
const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Environment variable the API key is read from by `from_env`.
pub const API_KEY_ENV: &str = "CMC_PRO_API_KEY";

/// How long a fetched listing stays fresh before the next call hits the
/// network again.
pub const REVALIDATE_WINDOW_SECS: i64 = 30;

/// CoinMarketCap listings provider.
///
/// - **Requires**: API key, passed in the `X-CMC_PRO_API_KEY` header.
/// - **Endpoint**: `/v1/cryptocurrency/listings/latest`.
/// - **Strategy**: one request per render cycle, revalidated on a fixed
///   30-second window; any non-success status is a hard error with no retry.
#[derive(Debug)]
pub struct CoinMarketCapProvider {
    client: Client,
    api_key: String,
    /// Last successful listing, reused within the revalidation window.
    cache: Mutex<Option<CachedListing>>,
}

#[derive(Debug)]
struct CachedListing {
    fetched_at: DateTime<Utc>,
    quotes: Vec<Quote>,
}

impl CoinMarketCapProvider {
    /// Create a provider with an explicit API key.
    /// A blank key is a configuration error.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CoreError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CoreError::MissingApiKey(API_KEY_ENV.to_string()));
        }

        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(StdDuration::from_secs(30));
        Ok(Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            cache: Mutex::new(None),
        })
    }

    /// Create a provider from the `CMC_PRO_API_KEY` environment variable.
    /// Fails before any network call is attempted if the variable is unset
    /// or blank.
    pub fn from_env() -> Result<Self, CoreError> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| CoreError::MissingApiKey(API_KEY_ENV.to_string()))?;
        Self::new(key)
    }

    /// Parse a listings response body into quotes.
    ///
    /// Validation happens here, once: records with an empty symbol or a
    /// negative price fail the whole call (no partial results).
    pub fn parse_listings(body: &str) -> Result<Vec<Quote>, CoreError> {
        let resp: ListingsResponse =
            serde_json::from_str(body).map_err(|e| CoreError::Api {
                provider: "CoinMarketCap".into(),
                message: format!("Failed to parse listings response: {e}"),
            })?;

        let mut quotes = Vec::with_capacity(resp.data.len());
        for record in resp.data {
            if record.symbol.is_empty() {
                return Err(CoreError::Api {
                    provider: "CoinMarketCap".into(),
                    message: format!("Listing record {} has an empty symbol", record.id),
                });
            }
            if !record.quote.usd.price.is_finite() || record.quote.usd.price < 0.0 {
                return Err(CoreError::Api {
                    provider: "CoinMarketCap".into(),
                    message: format!(
                        "Invalid USD price {} for symbol {}",
                        record.quote.usd.price, record.symbol
                    ),
                });
            }
            quotes.push(Quote::new(
                record.id.to_string(),
                record.symbol,
                record.quote.usd.price,
            ));
        }

        Ok(quotes)
    }

    /// Manually insert a listing into the revalidation cache, as if a fetch
    /// completed at `fetched_at` (useful for testing or offline startup).
    pub fn set_cached_listing(&self, fetched_at: DateTime<Utc>, quotes: Vec<Quote>) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = Some(CachedListing { fetched_at, quotes });
    }

    /// The cached listing if it is still fresh at `now`, i.e. fetched less
    /// than `REVALIDATE_WINDOW_SECS` ago. `None` on an empty or stale cache.
    #[must_use]
    pub fn cached_listing(&self, now: DateTime<Utc>) -> Option<Vec<Quote>> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.as_ref().and_then(|c| {
            if now - c.fetched_at < Duration::seconds(REVALIDATE_WINDOW_SECS) {
                Some(c.quotes.clone())
            } else {
                None
            }
        })
    }
}

// ── CoinMarketCap API response types ────────────────────────────────

#[derive(Deserialize)]
struct ListingsResponse {
    data: Vec<ListingRecord>,
}

#[derive(Deserialize)]
struct ListingRecord {
    id: u64,
    symbol: String,
    quote: QuoteEnvelope,
}

#[derive(Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "USD")]
    usd: UsdQuote,
}

#[derive(Deserialize)]
struct UsdQuote {
    price: f64,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for CoinMarketCapProvider {
    fn name(&self) -> &str {
        "CoinMarketCap"
    }

    async fn fetch_quotes(&self) -> Result<Vec<Quote>, CoreError> {
        let now = Utc::now();
        if let Some(quotes) = self.cached_listing(now) {
            log::debug!("CoinMarketCap: serving {} quotes from cache", quotes.len());
            return Ok(quotes);
        }

        let resp = self
            .client
            .get(LISTINGS_URL)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            log::warn!("CoinMarketCap: listings request failed with status {status}");
            return Err(CoreError::Api {
                provider: "CoinMarketCap".into(),
                message: format!("Listings request failed with status {status}"),
            });
        }

        let body = resp.text().await?;
        let quotes = Self::parse_listings(&body)?;
        log::debug!("CoinMarketCap: fetched {} quotes", quotes.len());

        self.set_cached_listing(now, quotes.clone());

        Ok(quotes)
    }
}
