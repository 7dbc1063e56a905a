// ═══════════════════════════════════════════════════════════════════
// Model Tests — Quote, QuoteBook, ParsedAmount, Preferences
// ═══════════════════════════════════════════════════════════════════

use chrono::{TimeZone, Utc};
use converteth_core::models::amount::ParsedAmount;
use converteth_core::models::preferences::{Preferences, MAJOR_COINS};
use converteth_core::models::quote::{Quote, QuoteBook};

fn book(quotes: Vec<Quote>) -> QuoteBook {
    QuoteBook::new(quotes, Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
}

// ═══════════════════════════════════════════════════════════════════
//  Quote & QuoteBook
// ═══════════════════════════════════════════════════════════════════

mod quote_book {
    use super::*;

    #[test]
    fn price_of_matches_the_fetched_record() {
        let b = book(vec![
            Quote::new("1", "BTC", 50_000.0),
            Quote::new("1027", "ETH", 2_500.0),
        ]);
        assert_eq!(b.price_of("BTC"), Some(50_000.0));
        assert_eq!(b.price_of("ETH"), Some(2_500.0));
    }

    #[test]
    fn price_of_unknown_symbol_is_none() {
        let b = book(vec![Quote::new("1", "BTC", 50_000.0)]);
        assert_eq!(b.price_of("DOGE"), None);
    }

    #[test]
    fn index_keys_are_exactly_the_fetched_symbols() {
        let b = book(vec![
            Quote::new("1", "BTC", 50_000.0),
            Quote::new("1027", "ETH", 2_500.0),
        ]);
        assert!(b.contains("BTC"));
        assert!(b.contains("ETH"));
        assert!(!b.contains("USD"));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn symbols_iterate_in_fetch_order() {
        let b = book(vec![
            Quote::new("1027", "ETH", 2_500.0),
            Quote::new("1", "BTC", 50_000.0),
        ]);
        let symbols: Vec<&str> = b.symbols().collect();
        assert_eq!(symbols, vec!["ETH", "BTC"]);
    }

    #[test]
    fn duplicate_symbol_last_record_wins() {
        let b = book(vec![
            Quote::new("1", "BTC", 50_000.0),
            Quote::new("99", "BTC", 60_000.0),
        ]);
        assert_eq!(b.price_of("BTC"), Some(60_000.0));
    }

    #[test]
    fn empty_book_has_no_prices_and_no_timestamp() {
        let b = QuoteBook::empty();
        assert!(b.is_empty());
        assert_eq!(b.price_of("BTC"), None);
        assert_eq!(b.fetched_at(), None);
    }

    #[test]
    fn fetched_at_is_recorded() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let b = QuoteBook::new(vec![Quote::new("1", "BTC", 1.0)], ts);
        assert_eq!(b.fetched_at(), Some(ts));
    }

    #[test]
    fn zero_price_is_kept_in_the_index() {
        // A zero price is a derivation gap, not an ingestion failure.
        let b = book(vec![Quote::new("7", "DEAD", 0.0)]);
        assert_eq!(b.price_of("DEAD"), Some(0.0));
    }

    #[test]
    fn serde_roundtrip_json() {
        let q = Quote::new("1027", "ETH", 2_500.5);
        let json = serde_json::to_string(&q).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ParsedAmount
// ═══════════════════════════════════════════════════════════════════

mod parsed_amount {
    use super::*;

    #[test]
    fn plain_integer() {
        assert_eq!(ParsedAmount::parse("1"), ParsedAmount::Value(1.0));
    }

    #[test]
    fn decimal() {
        assert_eq!(ParsedAmount::parse("2.5"), ParsedAmount::Value(2.5));
    }

    #[test]
    fn partial_entry_with_trailing_dot() {
        // "1." is tolerated mid-typing and parses as 1.0
        assert_eq!(ParsedAmount::parse("1."), ParsedAmount::Value(1.0));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(ParsedAmount::parse("  3 "), ParsedAmount::Value(3.0));
    }

    #[test]
    fn negative_is_a_value() {
        assert_eq!(ParsedAmount::parse("-3"), ParsedAmount::Value(-3.0));
    }

    #[test]
    fn non_numeric_is_unparseable() {
        assert_eq!(ParsedAmount::parse("abc"), ParsedAmount::Unparseable);
    }

    #[test]
    fn empty_is_unparseable() {
        assert_eq!(ParsedAmount::parse(""), ParsedAmount::Unparseable);
    }

    #[test]
    fn trailing_garbage_is_unparseable() {
        assert_eq!(ParsedAmount::parse("2abc"), ParsedAmount::Unparseable);
    }

    #[test]
    fn non_finite_is_unparseable() {
        assert_eq!(ParsedAmount::parse("NaN"), ParsedAmount::Unparseable);
        assert_eq!(ParsedAmount::parse("inf"), ParsedAmount::Unparseable);
        assert_eq!(ParsedAmount::parse("-inf"), ParsedAmount::Unparseable);
    }

    #[test]
    fn value_accessor() {
        assert_eq!(ParsedAmount::parse("4").value(), Some(4.0));
        assert_eq!(ParsedAmount::parse("x").value(), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Preferences
// ═══════════════════════════════════════════════════════════════════

mod preferences {
    use super::*;

    #[test]
    fn defaults() {
        let p = Preferences::default();
        assert_eq!(p.base_currency, "BTC");
        assert_eq!(p.displayed_coins, MAJOR_COINS.to_vec());
        assert_eq!(p.amount, "1");
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let p = Preferences::default();
        let v: serde_json::Value = serde_json::to_value(&p).unwrap();
        assert_eq!(v["baseCurrency"], "BTC");
        assert_eq!(v["amount"], "1");
        assert_eq!(v["displayedCoins"][0], "BTC");
        assert_eq!(v["displayedCoins"][4], "MKR");
    }

    #[test]
    fn deserializes_persisted_shape() {
        let json = r#"{"baseCurrency":"ETH","displayedCoins":["ETH","OP"],"amount":"0.5"}"#;
        let p: Preferences = serde_json::from_str(json).unwrap();
        assert_eq!(p.base_currency, "ETH");
        assert_eq!(p.displayed_coins, vec!["ETH", "OP"]);
        assert_eq!(p.amount, "0.5");
    }

    #[test]
    fn add_coin_appends_in_order() {
        let mut p = Preferences::default();
        assert!(p.add_coin("SOL"));
        assert_eq!(p.displayed_coins.last().map(String::as_str), Some("SOL"));
    }

    #[test]
    fn add_coin_is_idempotent() {
        let mut p = Preferences::default();
        let before = p.displayed_coins.clone();
        assert!(!p.add_coin("BTC"));
        assert_eq!(p.displayed_coins, before);
    }

    #[test]
    fn remove_coin_is_idempotent() {
        let mut p = Preferences::default();
        assert!(p.remove_coin("OP"));
        assert!(!p.remove_coin("OP"));
        assert!(!p.is_tracked("OP"));
    }

    #[test]
    fn add_then_remove_restores_the_tracked_set() {
        let mut p = Preferences::default();
        let before = p.displayed_coins.clone();
        assert!(p.add_coin("SOL"));
        assert!(p.remove_coin("SOL"));
        assert_eq!(p.displayed_coins, before);
    }

    #[test]
    fn is_tracked() {
        let p = Preferences::default();
        assert!(p.is_tracked("ETH"));
        assert!(!p.is_tracked("SOL"));
    }
}
