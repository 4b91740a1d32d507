//! Macros for defining fixed-length code types.

/// Macro to define a fixed-length code with a specific parameter name.
///
/// This generates a newtype wrapper around `String` with:
/// - A `LEN` constant (length in bytes)
/// - `parse()` to validate and wrap a string
/// - `as_str()` to borrow the raw code
/// - `Display` and `AsRef<str>` implementations
///
/// Only the length is checked. The content is passed through verbatim so
/// the rendered identifier carries exactly what the caller sent.
///
/// # Example
///
/// ```ignore
/// define_code!(Dir3Code, "unit", 9);
///
/// let unit = Dir3Code::parse("A01002832")?;
/// ```
#[macro_export]
macro_rules! define_code {
    ($name:ident, $field:literal, $len:literal) => {
        /// A fixed-length code.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Required length of this code, in bytes.
            pub const LEN: usize = $len;

            /// Name of the request parameter this code is read from.
            pub const FIELD: &'static str = $field;

            /// Parses a code from a string, checking only its length.
            pub fn parse(s: &str) -> Result<Self, $crate::IdError> {
                if s.len() != Self::LEN {
                    return Err($crate::IdError::InvalidLength {
                        field: Self::FIELD,
                        expected: Self::LEN,
                        actual: s.len(),
                    });
                }
                Ok(Self(s.to_string()))
            }

            /// Returns the raw code.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}
