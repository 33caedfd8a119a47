//! Declarative country rules and the generic structural validator.
//!
//! Most per-country validators follow the same five-step pattern
//! (sanitize → length → character classes → sub-fields → checksum), so they
//! are expressed as static [`CountryRule`] descriptors interpreted by
//! [`engine::validate`] instead of ~150 near-duplicate functions. Countries
//! whose rule cannot be captured declaratively (date-aware national IDs,
//! multi-candidate checksums, letter substitution) are hand-written against
//! the same result contract, composing the shared checksum library.

mod descriptor;
pub mod engine;

pub use descriptor::*;
