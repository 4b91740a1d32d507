//! Validation of inbound allocation requests.

use crate::{format_identifier, Allocation, CounterKey, Dir3Code, IdError, Mode, Series, Year};

/// A validated allocation request.
///
/// Constructing one is the only gate in front of the counter store: a raw
/// request that fails here never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierRequest {
    pub unit: Dir3Code,
    pub year: Year,
    pub series: Series,
}

impl IdentifierRequest {
    /// Validates raw path parameters for the given mode.
    ///
    /// Checks run in order (unit, year, series) and stop at the first failure.
    pub fn parse(mode: Mode, unit: &str, year: &str, series: &str) -> Result<Self, IdError> {
        let unit = Dir3Code::parse(unit)?;
        let year = Year::parse(year)?;
        let series = Series::parse(mode, series)?;
        Ok(Self { unit, year, series })
    }

    /// Mode implied by the series.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.series.mode()
    }

    /// Counter this request allocates from.
    #[must_use]
    pub fn counter_key(&self) -> CounterKey {
        CounterKey::new(self.unit.clone(), self.year, self.mode())
    }

    /// Renders the canonical identifier for an allocated index.
    #[must_use]
    pub fn render(&self, index: Allocation) -> String {
        format_identifier(
            self.mode(),
            self.unit.as_str(),
            self.year.value(),
            self.series.as_str(),
            index.value(),
        )
    }
}
