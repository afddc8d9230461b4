//! Microchip identity rules: ISO 11784/11785 number normalization,
//! format validation, and manufacturer directory lookup.
//!
//! The manufacturer directory is an injected dependency
//! ([`ManufacturerDirectory`]) so the HTTP layer can wire in the real
//! registry client in production and tests can substitute fixtures.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// An ISO-compliant chip number is exactly 15 digits.
pub const CHIP_NUMBER_LEN: usize = 15;

static ISO_CHIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{15}$").expect("valid regex"));

/// Whether `number` is already a canonical 15-digit chip number.
pub fn is_canonical_chip_number(number: &str) -> bool {
    ISO_CHIP_RE.is_match(number)
}

/// Normalize a raw chip number to its 15-digit canonical form.
///
/// Strips every non-digit character (scanners commonly emit separators),
/// then requires exactly 15 digits to remain. Anything else is a hard
/// validation failure.
pub fn normalize_chip_number(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != CHIP_NUMBER_LEN {
        return Err(CoreError::Validation(format!(
            "Microchip number must be exactly {CHIP_NUMBER_LEN} digits according to ISO 11784/11785"
        )));
    }
    Ok(digits)
}

/// A manufacturer registry entry for a known chip number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub manufacturer: String,
    /// Implant date recorded by the manufacturer, ISO `YYYY-MM-DD`.
    pub implant_date: Option<String>,
    pub implanter_clinic_id: Option<String>,
}

/// Lookup interface over a manufacturer registry.
///
/// Implementations must be pure reads: `validate_chip` may call `lookup`
/// redundantly and expects the same answer each time.
pub trait ManufacturerDirectory: Send + Sync {
    fn lookup(&self, chip_number: &str) -> Option<&DirectoryEntry>;
}

/// In-memory directory seeded with the manufacturer registry fixtures.
///
/// Stands in for the external manufacturer registry; production would
/// swap in a client-backed implementation behind the same trait.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    entries: HashMap<String, DirectoryEntry>,
}

impl StaticDirectory {
    /// Empty directory; every well-formed chip resolves as "Unknown".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Directory preloaded with the known registry entries.
    pub fn with_known_manufacturers() -> Self {
        let mut dir = Self::default();
        dir.insert("981200012345678", "HomeAgain", "2024-01-10", "CLINIC-12345");
        dir.insert("981200012345679", "PetLink", "2024-02-15", "CLINIC-67890");
        dir.insert("981200012345680", "AKC Reunite", "2024-03-20", "CLINIC-11111");
        dir
    }

    /// Add or replace an entry. Intended for test fixtures.
    pub fn insert(
        &mut self,
        chip_number: &str,
        manufacturer: &str,
        implant_date: &str,
        clinic_id: &str,
    ) {
        self.entries.insert(
            chip_number.to_string(),
            DirectoryEntry {
                manufacturer: manufacturer.to_string(),
                implant_date: Some(implant_date.to_string()),
                implanter_clinic_id: Some(clinic_id.to_string()),
            },
        );
    }
}

impl ManufacturerDirectory for StaticDirectory {
    fn lookup(&self, chip_number: &str) -> Option<&DirectoryEntry> {
        self.entries.get(chip_number)
    }
}

/// Outcome of validating a chip number against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipValidation {
    pub chip_number: String,
    pub is_valid: bool,
    pub manufacturer: Option<String>,
    pub implant_date: Option<String>,
    /// Blocking error when `is_valid` is false; informational note when a
    /// well-formed number is simply absent from the directory.
    pub message: Option<String>,
}

/// Validate a chip number and resolve its manufacturer.
///
/// The input must already be canonical (see [`normalize_chip_number`]);
/// a malformed number yields `is_valid = false` and callers must treat
/// that as a hard failure. A well-formed number missing from the
/// directory is still **valid**: it gets manufacturer "Unknown" and a
/// non-blocking message, because local registration does not require the
/// chip to be pre-registered with its manufacturer.
pub fn validate_chip(chip_number: &str, directory: &dyn ManufacturerDirectory) -> ChipValidation {
    if !is_canonical_chip_number(chip_number) {
        return ChipValidation {
            chip_number: chip_number.to_string(),
            is_valid: false,
            manufacturer: None,
            implant_date: None,
            message: Some(
                "Invalid microchip format. Must be 15 digits according to ISO 11784/11785"
                    .to_string(),
            ),
        };
    }

    match directory.lookup(chip_number) {
        Some(entry) => ChipValidation {
            chip_number: chip_number.to_string(),
            is_valid: true,
            manufacturer: Some(entry.manufacturer.clone()),
            implant_date: entry.implant_date.clone(),
            message: None,
        },
        None => ChipValidation {
            chip_number: chip_number.to_string(),
            is_valid: true,
            manufacturer: Some("Unknown".to_string()),
            implant_date: None,
            message: Some(
                "Microchip not found in manufacturer registry (will be registered in local system)"
                    .to_string(),
            ),
        },
    }
}

/// The 3-digit manufacturer/country code prefix, if the number is canonical.
pub fn manufacturer_code(chip_number: &str) -> Option<&str> {
    is_canonical_chip_number(chip_number).then(|| &chip_number[..3])
}

/// Country of origin derived from the ISO code prefix.
pub fn country_for_chip(chip_number: &str) -> &'static str {
    match manufacturer_code(chip_number) {
        Some("981") => "Uzbekistan",
        Some("982") => "Kazakhstan",
        Some("985") => "Thailand",
        Some("900") | Some("901") => "United States",
        Some("953") => "Germany",
        Some("956") => "China",
        _ => "Unknown",
    }
}
