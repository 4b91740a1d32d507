//! Typed parameters for identifier allocation.
//!
//! Codes are length-checked at parse time. Once a value of one of these types
//! exists it is known to have the shape the canonical format requires.

use std::num::NonZeroU64;

use crate::{define_code, IdError};

// =============================================================================
// Codes
// =============================================================================

define_code!(Dir3Code, "unit", 9);
define_code!(DocumentSeries, "series", 2);
define_code!(CaseFileSeries, "series", 8);

// =============================================================================
// Mode
// =============================================================================

/// What kind of record the identifier is issued for.
///
/// The mode doubles as the counter type code: documents and case files of the
/// same unit and year are numbered independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    /// Document identifier (`D`), 2-character series.
    Document,
    /// Case-file identifier (`E`, expediente), 8-character series.
    CaseFile,
}

impl Mode {
    /// Counter type code persisted alongside the counter row.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Mode::Document => "D",
            Mode::CaseFile => "E",
        }
    }

    /// Required series length for this mode.
    #[must_use]
    pub const fn series_len(&self) -> usize {
        match self {
            Mode::Document => DocumentSeries::LEN,
            Mode::CaseFile => CaseFileSeries::LEN,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Series
// =============================================================================

/// A series code whose length matches its mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Series {
    Document(DocumentSeries),
    CaseFile(CaseFileSeries),
}

impl Series {
    /// Parses a series for the given mode.
    pub fn parse(mode: Mode, s: &str) -> Result<Self, IdError> {
        match mode {
            Mode::Document => DocumentSeries::parse(s).map(Series::Document),
            Mode::CaseFile => CaseFileSeries::parse(s).map(Series::CaseFile),
        }
    }

    /// Mode this series belongs to.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Series::Document(_) => Mode::Document,
            Series::CaseFile(_) => Mode::CaseFile,
        }
    }

    /// Returns the raw series code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Series::Document(s) => s.as_str(),
            Series::CaseFile(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Year
// =============================================================================

/// Calendar year written as exactly four characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year(u16);

impl Year {
    /// Required length of the textual year.
    pub const LEN: usize = 4;

    /// Parses a four-character non-negative year. A leading `+` is accepted
    /// (`+202` is the year 202); `-` and whitespace are not.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.len() != Self::LEN {
            return Err(IdError::InvalidYear(s.to_string()));
        }
        s.parse::<u16>()
            .map(Self)
            .map_err(|_| IdError::InvalidYear(s.to_string()))
    }

    /// Creates a year from its numeric value.
    #[must_use]
    pub const fn new(year: u16) -> Self {
        Self(year)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Counter Key
// =============================================================================

/// Scope of one counter: unit, year and mode.
///
/// The series is deliberately absent. Every series of a unit/year/mode draws
/// from the same counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey {
    pub unit: Dir3Code,
    pub year: Year,
    pub mode: Mode,
}

impl CounterKey {
    /// Creates a new counter key.
    #[must_use]
    pub fn new(unit: Dir3Code, year: Year, mode: Mode) -> Self {
        Self { unit, year, mode }
    }
}

impl std::fmt::Display for CounterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.unit, self.year, self.mode)
    }
}

// =============================================================================
// Allocation
// =============================================================================

/// One issued counter value. Never zero: a freshly created counter row holds
/// 0 and that value is not an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Allocation(NonZeroU64);

impl Allocation {
    /// The first allocation issued for any key.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Wraps a counter value, returning `None` for the 0 sentinel.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        match NonZeroU64::new(value) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir3_code_length() {
        assert!(Dir3Code::parse("A01002832").is_ok());
        assert!(matches!(
            Dir3Code::parse("A0100283").unwrap_err(),
            IdError::InvalidLength {
                field: "unit",
                expected: 9,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(Mode::Document.code(), "D");
        assert_eq!(Mode::CaseFile.code(), "E");
        assert_eq!(Mode::CaseFile.to_string(), "E");
    }

    #[test]
    fn test_series_length_follows_mode() {
        assert_eq!(Mode::Document.series_len(), 2);
        assert_eq!(Mode::CaseFile.series_len(), 8);
        assert!(Series::parse(Mode::Document, "AB").is_ok());
        assert!(Series::parse(Mode::Document, "ABCDEFGH").is_err());
        assert!(Series::parse(Mode::CaseFile, "ABCDEFGH").is_ok());
        assert!(Series::parse(Mode::CaseFile, "AB").is_err());
        assert_eq!(
            Series::parse(Mode::CaseFile, "ABCDEFGH").unwrap().mode(),
            Mode::CaseFile
        );
    }

    #[test]
    fn test_year_parsing() {
        assert_eq!(Year::parse("2024").unwrap().value(), 2024);
        assert_eq!(Year::parse("0999").unwrap().value(), 999);
        assert_eq!(Year::parse("+202").unwrap().value(), 202);
        assert!(Year::parse("202").is_err());
        assert!(Year::parse("20245").is_err());
        assert!(Year::parse("-202").is_err());
        assert!(Year::parse(" 202").is_err());
        assert!(Year::parse("++20").is_err());
        assert!(Year::parse("20a4").is_err());
    }

    #[test]
    fn test_allocation_rejects_sentinel() {
        assert!(Allocation::new(0).is_none());
        assert_eq!(Allocation::new(1), Some(Allocation::FIRST));
        assert_eq!(Allocation::new(42).unwrap().value(), 42);
    }

    #[test]
    fn test_counter_key_ignores_series() {
        let unit = Dir3Code::parse("A01002832").unwrap();
        let a = CounterKey::new(unit.clone(), Year::new(2024), Mode::Document);
        let b = CounterKey::new(unit, Year::new(2024), Mode::Document);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "A01002832/2024/D");
    }
}
