use crate::models::amount::ParsedAmount;
use crate::models::preferences::Preferences;
use crate::models::quote::{Quote, QuoteBook};

/// Outcome of adding a coin by a typed symbol. Exactly one applies; each
/// maps to a distinct user-visible message, and only `Added` mutates the
/// tracked set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyTracked,
    UnknownSymbol,
}

impl std::fmt::Display for AddOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddOutcome::Added => write!(f, "Coin added"),
            AddOutcome::AlreadyTracked => write!(f, "Coin is already displayed"),
            AddOutcome::UnknownSymbol => write!(f, "Unknown symbol: not in the latest listings"),
        }
    }
}

/// Derives converted amounts from the latest quote snapshot and the user's
/// preferences.
///
/// All derivations are pure functions of `(QuoteBook, Preferences)`; they
/// are recomputed synchronously on every state change. Gaps (unknown symbol,
/// zero price, unparseable amount) are omissions, never errors.
pub struct ConversionService;

impl ConversionService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` denominated in `from` into `to`:
    /// `amount * price(from) / price(to)`, formatted to 2 decimal places.
    ///
    /// `None` when either symbol is absent from the latest fetch or either
    /// price is zero.
    #[must_use]
    pub fn convert(&self, book: &QuoteBook, amount: f64, from: &str, to: &str) -> Option<String> {
        let from_price = book.price_of(from)?;
        let to_price = book.price_of(to)?;
        if from_price == 0.0 || to_price == 0.0 {
            return None;
        }
        Some(format!("{:.2}", amount * from_price / to_price))
    }

    /// `(symbol, converted amount)` for every tracked symbol except the base
    /// currency, in tracked order. Entries whose conversion is undefined are
    /// omitted; an unparseable amount yields no entries at all.
    #[must_use]
    pub fn tracked_conversions(
        &self,
        book: &QuoteBook,
        prefs: &Preferences,
    ) -> Vec<(String, String)> {
        let amount = match ParsedAmount::parse(&prefs.amount) {
            ParsedAmount::Value(v) => v,
            ParsedAmount::Unparseable => return Vec::new(),
        };

        prefs
            .displayed_coins
            .iter()
            .filter(|symbol| **symbol != prefs.base_currency)
            .filter_map(|symbol| {
                self.convert(book, amount, &prefs.base_currency, symbol)
                    .map(|converted| (symbol.clone(), converted))
            })
            .collect()
    }

    /// Known quotes not currently tracked, sorted lexicographically by
    /// symbol. This is what the "add coin" selector offers.
    #[must_use]
    pub fn candidates_to_add<'a>(
        &self,
        book: &'a QuoteBook,
        prefs: &Preferences,
    ) -> Vec<&'a Quote> {
        let mut candidates: Vec<&Quote> = book
            .quotes()
            .iter()
            .filter(|q| !prefs.is_tracked(&q.symbol))
            .collect();
        candidates.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        candidates
    }

    /// Add a coin by typed symbol, validating against the known quote set
    /// and the already-tracked set. Input is trimmed and uppercased before
    /// matching (listing tickers are uppercase).
    pub fn add_by_symbol(
        &self,
        book: &QuoteBook,
        prefs: &mut Preferences,
        typed: &str,
    ) -> AddOutcome {
        let symbol = typed.trim().to_uppercase();
        if !book.contains(&symbol) {
            return AddOutcome::UnknownSymbol;
        }
        if prefs.is_tracked(&symbol) {
            return AddOutcome::AlreadyTracked;
        }
        prefs.add_coin(symbol);
        AddOutcome::Added
    }
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new()
    }
}
