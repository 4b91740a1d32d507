//! # eni-id
//!
//! Parameter types, request validation, and canonical formatting for ENI
//! (Esquema Nacional de Interoperabilidad) document and case-file identifiers.
//!
//! ## Identifier Format
//!
//! Every identifier is scoped by an organizational unit (a DIR3 code), a
//! calendar year, and a series:
//!
//! - Document: `ES_{unit}_{year}_{series}{index:28}`
//! - Case file: `ES_{unit}_{year}_EXP_{series}_{index:21}`
//!
//! Examples:
//! - `ES_A01002832_2024_AB0000000000000000000000000007`
//! - `ES_A01002832_2024_EXP_CONTRATO_000000000000000000042`
//!
//! The index is allocated elsewhere; this crate only validates the inbound
//! parameters and renders the final string. Parsing is strict and happens
//! before any allocation is attempted.

mod error;
mod format;
mod macros;
mod request;
mod types;

pub use error::IdError;
pub use format::{format_identifier, CASE_FILE_INDEX_WIDTH, COUNTRY_PREFIX, DOCUMENT_INDEX_WIDTH};
pub use request::IdentifierRequest;
pub use types::*;
