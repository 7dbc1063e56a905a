pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use models::amount::ParsedAmount;
use models::preferences::Preferences;
use models::quote::{Quote, QuoteBook};
use providers::traits::QuoteProvider;
use services::conversion::{AddOutcome, ConversionService};
use storage::store::{self, PreferenceStore};

use errors::CoreError;

/// Main entry point for the ConvertETH core library.
///
/// Owns the user's preferences and the latest quote snapshot, and exposes
/// the derived conversion views. All mutations are synchronous; the only
/// suspending operation is `refresh_quotes`, which replaces the snapshot
/// wholesale. When a store is attached, preferences are rewritten after
/// every change.
#[must_use]
pub struct CoinConverter {
    preferences: Preferences,
    quotes: QuoteBook,
    conversion_service: ConversionService,
    store: Option<Box<dyn PreferenceStore>>,
    /// Tracks whether any preference change has occurred since the last
    /// save/load. Only interesting for hosts without an attached store.
    dirty: bool,
}

impl std::fmt::Debug for CoinConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinConverter")
            .field("quotes", &self.quotes.len())
            .field("preferences", &self.preferences)
            .field("has_store", &self.store.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl CoinConverter {
    /// Create a converter with default preferences and no persistence.
    pub fn new() -> Self {
        Self::build(Preferences::default(), None)
    }

    /// Create a converter backed by a store. Persisted preferences are
    /// loaded if present and usable; otherwise defaults apply.
    pub fn with_store(store: Box<dyn PreferenceStore>) -> Result<Self, CoreError> {
        let preferences = store.load()?.unwrap_or_default();
        Ok(Self::build(preferences, Some(store)))
    }

    /// Create a converter from a raw preference blob (the storage envelope).
    /// Use this for hosts that handle key-value I/O themselves.
    /// A missing or corrupt blob falls back to defaults.
    pub fn from_blob(blob: &str) -> Self {
        let preferences = store::read_blob(blob).unwrap_or_default();
        Self::build(preferences, None)
    }

    /// Serialize the current preferences to a storage envelope the host can
    /// write to its own key-value storage. Clears the unsaved-changes flag.
    pub fn to_blob(&mut self) -> Result<String, CoreError> {
        let blob = store::write_blob(&self.preferences)?;
        self.dirty = false;
        Ok(blob)
    }

    // ── Quote intake ────────────────────────────────────────────────

    /// Replace the quote snapshot wholesale. There is no incremental update.
    pub fn set_quotes(&mut self, quotes: Vec<Quote>) {
        self.quotes = QuoteBook::new(quotes, chrono::Utc::now());
    }

    /// Fetch the latest listing from a provider and replace the snapshot.
    /// Any provider failure is surfaced as-is; the previous snapshot is kept.
    pub async fn refresh_quotes(&mut self, provider: &dyn QuoteProvider) -> Result<(), CoreError> {
        let quotes = provider.fetch_quotes().await?;
        self.set_quotes(quotes);
        Ok(())
    }

    /// The current quote snapshot.
    #[must_use]
    pub fn quotes(&self) -> &QuoteBook {
        &self.quotes
    }

    // ── Derived views ───────────────────────────────────────────────

    /// USD price of a symbol from the latest fetch.
    #[must_use]
    pub fn price_of(&self, symbol: &str) -> Option<f64> {
        self.quotes.price_of(symbol)
    }

    /// Convert amount text from one symbol to another, to 2 decimal places.
    /// `None` for unparseable amounts, unknown symbols, or zero prices.
    #[must_use]
    pub fn convert(&self, amount: &str, from: &str, to: &str) -> Option<String> {
        let amount = ParsedAmount::parse(amount).value()?;
        self.conversion_service.convert(&self.quotes, amount, from, to)
    }

    /// Converted amounts for every tracked coin except the base currency,
    /// in tracked order, with undefined entries omitted.
    #[must_use]
    pub fn tracked_conversions(&self) -> Vec<(String, String)> {
        self.conversion_service
            .tracked_conversions(&self.quotes, &self.preferences)
    }

    /// Known quotes not yet tracked, sorted by symbol. Options for the
    /// "add coin" selector.
    #[must_use]
    pub fn candidates_to_add(&self) -> Vec<&Quote> {
        self.conversion_service
            .candidates_to_add(&self.quotes, &self.preferences)
    }

    /// All symbols of the latest fetch, in fetch order. Options for the
    /// base-currency selector.
    #[must_use]
    pub fn known_symbols(&self) -> Vec<&str> {
        self.quotes.symbols().collect()
    }

    // ── Preferences ─────────────────────────────────────────────────

    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    #[must_use]
    pub fn base_currency(&self) -> &str {
        &self.preferences.base_currency
    }

    #[must_use]
    pub fn amount(&self) -> &str {
        &self.preferences.amount
    }

    #[must_use]
    pub fn displayed_coins(&self) -> &[String] {
        &self.preferences.displayed_coins
    }

    /// Replace the base currency. No validation against known symbols: an
    /// unknown base just makes conversions undefined downstream.
    pub fn set_base_currency(&mut self, symbol: impl Into<String>) -> Result<(), CoreError> {
        let symbol = symbol.into();
        if symbol == self.preferences.base_currency {
            return Ok(());
        }
        self.preferences.base_currency = symbol;
        self.mark_changed()
    }

    /// Replace the amount text verbatim. Any string is accepted; numeric
    /// parse failures degrade to "no conversions shown" downstream.
    pub fn set_amount(&mut self, amount: impl Into<String>) -> Result<(), CoreError> {
        let amount = amount.into();
        if amount == self.preferences.amount {
            return Ok(());
        }
        self.preferences.amount = amount;
        self.mark_changed()
    }

    /// Track a coin. Idempotent: returns `false` (and does not persist)
    /// if the symbol was already tracked.
    pub fn add_tracked(&mut self, symbol: impl Into<String>) -> Result<bool, CoreError> {
        if !self.preferences.add_coin(symbol) {
            return Ok(false);
        }
        self.mark_changed()?;
        Ok(true)
    }

    /// Stop tracking a coin. Idempotent: returns `false` if it was not
    /// tracked.
    pub fn remove_tracked(&mut self, symbol: &str) -> Result<bool, CoreError> {
        if !self.preferences.remove_coin(symbol) {
            return Ok(false);
        }
        self.mark_changed()?;
        Ok(true)
    }

    /// Track a coin by typed symbol, validated against the known quote set
    /// and the tracked set. State mutates (and persists) only on
    /// `AddOutcome::Added`.
    pub fn add_by_symbol(&mut self, typed: &str) -> Result<AddOutcome, CoreError> {
        let outcome =
            self.conversion_service
                .add_by_symbol(&self.quotes, &mut self.preferences, typed);
        if outcome == AddOutcome::Added {
            self.mark_changed()?;
        }
        Ok(outcome)
    }

    /// Returns `true` if preferences changed since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // ── Internal ────────────────────────────────────────────────────

    fn mark_changed(&mut self) -> Result<(), CoreError> {
        self.dirty = true;
        if let Some(store) = self.store.as_mut() {
            store.save(&self.preferences)?;
            self.dirty = false;
        }
        Ok(())
    }

    fn build(preferences: Preferences, store: Option<Box<dyn PreferenceStore>>) -> Self {
        Self {
            preferences,
            quotes: QuoteBook::empty(),
            conversion_service: ConversionService::new(),
            store,
            dirty: false,
        }
    }
}

impl Default for CoinConverter {
    fn default() -> Self {
        Self::new()
    }
}
