/// Parse result for the user-entered amount text.
///
/// The raw text is kept verbatim in `Preferences` so partial numeric entry
/// like "1." survives a round-trip through storage. Derivations work on the
/// parsed form: an unparseable amount yields no conversions rather than an
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedAmount {
    Value(f64),
    Unparseable,
}

impl ParsedAmount {
    /// Parse amount text. Non-numeric and non-finite input (NaN, infinity)
    /// is `Unparseable`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => ParsedAmount::Value(v),
            _ => ParsedAmount::Unparseable,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            ParsedAmount::Value(v) => Some(*v),
            ParsedAmount::Unparseable => None,
        }
    }
}
