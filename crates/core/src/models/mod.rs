pub mod amount;
pub mod preferences;
pub mod quote;
