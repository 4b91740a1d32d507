//! Canonical rendering of allocated identifiers.

use crate::Mode;

/// Country prefix shared by every ENI identifier.
pub const COUNTRY_PREFIX: &str = "ES";

/// Zero-padded width of the index in document identifiers.
pub const DOCUMENT_INDEX_WIDTH: usize = 28;

/// Zero-padded width of the index in case-file identifiers.
pub const CASE_FILE_INDEX_WIDTH: usize = 21;

/// Renders the canonical identifier string.
///
/// Inputs are trusted: lengths were checked when the request was parsed.
/// An index wider than the field is written in full, never truncated.
#[must_use]
pub fn format_identifier(mode: Mode, unit: &str, year: u16, series: &str, index: u64) -> String {
    match mode {
        Mode::Document => format!(
            "{COUNTRY_PREFIX}_{unit}_{year}_{series}{index:0width$}",
            width = DOCUMENT_INDEX_WIDTH
        ),
        Mode::CaseFile => format!(
            "{COUNTRY_PREFIX}_{unit}_{year}_EXP_{series}_{index:0width$}",
            width = CASE_FILE_INDEX_WIDTH
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_document_identifier() {
        let id = format_identifier(Mode::Document, "123456789", 2024, "AB", 7);
        assert_eq!(id, "ES_123456789_2024_AB0000000000000000000000000007");
    }

    #[test]
    fn test_case_file_identifier() {
        let id = format_identifier(Mode::CaseFile, "123456789", 2024, "ABCDEFGH", 42);
        assert_eq!(id, "ES_123456789_2024_EXP_ABCDEFGH_000000000000000000042");
    }

    #[test]
    fn test_year_rendered_from_value() {
        let id = format_identifier(Mode::CaseFile, "123456789", 999, "ABCDEFGH", 1);
        assert!(id.starts_with("ES_123456789_999_EXP_"));
    }

    proptest! {
        #[test]
        fn document_index_field_is_fixed_width(index in 1u64..=999_999_999_999) {
            let id = format_identifier(Mode::Document, "123456789", 2024, "AB", index);
            let field = id.strip_prefix("ES_123456789_2024_AB").unwrap();
            prop_assert_eq!(field.len(), DOCUMENT_INDEX_WIDTH);
            prop_assert_eq!(field.parse::<u64>().unwrap(), index);
        }

        #[test]
        fn case_file_index_field_is_fixed_width(index in 1u64..=999_999_999_999) {
            let id = format_identifier(Mode::CaseFile, "123456789", 2024, "ABCDEFGH", index);
            let (_, field) = id.rsplit_once('_').unwrap();
            prop_assert_eq!(field.len(), CASE_FILE_INDEX_WIDTH);
            prop_assert_eq!(field.parse::<u64>().unwrap(), index);
        }
    }
}
