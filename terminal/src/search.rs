//! Search query classification
//!
//! A query is either an ISIN, which has to be resolved to a ticker first,
//! or a ticker symbol.

use crate::types::Symbol;

/// Classified search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecurityQuery {
    /// 12-character International Securities Identification Number
    Isin(String),

    /// Ticker symbol, upper-cased
    Ticker(Symbol),
}

impl SecurityQuery {
    /// Classify raw user input. Blank input yields `None`.
    ///
    /// The ISIN check runs on the trimmed input before upper-casing, so a
    /// lower-case ISIN is treated as a ticker.
    pub fn parse(input: &str) -> Option<Self> {
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        if is_isin(query) {
            Some(SecurityQuery::Isin(query.to_string()))
        } else {
            Some(SecurityQuery::Ticker(Symbol::new(query)))
        }
    }
}

/// `[A-Z]{2}[A-Z0-9]{9}[0-9]`: country prefix, national code, check digit
pub fn is_isin(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != 12 {
        return false;
    }

    bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..11]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        && bytes[11].is_ascii_digit()
}
