use serde::{Deserialize, Serialize};

/// Coins displayed by default before the user customizes anything.
pub const MAJOR_COINS: [&str; 5] = ["BTC", "ETH", "OP", "MATIC", "MKR"];

/// User-configurable preferences, persisted as a JSON blob after every change.
///
/// Field names match the persisted shape exactly:
/// `{ "baseCurrency": "BTC", "displayedCoins": ["BTC", ...], "amount": "1" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// The symbol the entered amount is denominated in.
    #[serde(rename = "baseCurrency")]
    pub base_currency: String,

    /// Tracked coins, in the order the user added them.
    #[serde(rename = "displayedCoins")]
    pub displayed_coins: Vec<String>,

    /// Amount text, kept verbatim to tolerate partial numeric entry ("1.").
    pub amount: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            base_currency: "BTC".to_string(),
            displayed_coins: MAJOR_COINS.iter().map(|s| s.to_string()).collect(),
            amount: "1".to_string(),
        }
    }
}

impl Preferences {
    /// Insert a symbol into the tracked list. Idempotent: returns `false`
    /// and leaves the list unchanged if the symbol is already tracked.
    pub fn add_coin(&mut self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into();
        if self.displayed_coins.contains(&symbol) {
            return false;
        }
        self.displayed_coins.push(symbol);
        true
    }

    /// Remove a symbol from the tracked list. Idempotent: returns `false`
    /// if the symbol was not tracked.
    pub fn remove_coin(&mut self, symbol: &str) -> bool {
        let before = self.displayed_coins.len();
        self.displayed_coins.retain(|c| c != symbol);
        self.displayed_coins.len() != before
    }

    #[must_use]
    pub fn is_tracked(&self, symbol: &str) -> bool {
        self.displayed_coins.iter().any(|c| c == symbol)
    }
}
