//! Classification of the dual-key animal search input.
//!
//! The registry accepts one search string that may be either a physical
//! microchip number (scanned in the field) or an official paperwork id.
//! The input is classified *before* any lookup runs, so each shape takes
//! exactly one primary lookup path instead of blind try-then-fallthrough.

use crate::microchip::is_canonical_chip_number;

/// The resolved shape of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchKey {
    /// Exactly 15 digits: treated as a microchip number first. An
    /// official id that happens to be 15 digits is still reachable via
    /// the official-id fallback when no chip matches.
    ChipNumber(String),
    /// Anything else: official id equality lookup only.
    OfficialId(String),
}

impl SearchKey {
    pub fn classify(query: &str) -> SearchKey {
        let trimmed = query.trim();
        if is_canonical_chip_number(trimmed) {
            SearchKey::ChipNumber(trimmed.to_string())
        } else {
            SearchKey::OfficialId(trimmed.to_string())
        }
    }
}
