//! Result types, normalization, and country/region tables.
//!
//! This module provides the foundational value types every validator in the
//! crate returns, plus the input normalizer and the ISO 3166 country tables
//! used for dispatch.

mod country;
mod error;
mod normalize;

pub use country::*;
pub use error::*;
pub use normalize::*;
