use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::Quote;

/// Trait abstraction for quote data sources.
///
/// The listings API (CoinMarketCap) implements this trait. If the API stops
/// working or changes, we replace only that one implementation — the rest of
/// the codebase is untouched. Tests substitute a mock.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the latest quote listing. All-or-nothing: either the full
    /// sequence of quotes is returned or the call fails; no partial results.
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, CoreError>;
}
