//! # finident
//!
//! Validation and normalization of structured financial identifiers —
//! IBAN, BBAN, VAT numbers, national tax/ID numbers, bank routing and
//! account numbers, and structured payment references — across 100+
//! jurisdictions.
//!
//! Every validator is a pure, synchronous, total function over its input
//! string: malformed input is always a [`core::ValidationResult`] value,
//! never a panic. There is no I/O, no network, and no mutable state;
//! validators may be shared freely across threads.
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "iban")] {
//! use finident::iban;
//!
//! let result = iban::validate_iban("BE68 5390 0754 7034");
//! assert!(result.is_valid());
//!
//! let details = iban::parse_iban("BE68539007547034").unwrap();
//! assert_eq!(details.country_code, "BE");
//! assert_eq!(details.bank_code.as_deref(), Some("539"));
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Result types, normalizer, checksum library, rule engine |
//! | `iban` | IBAN/BBAN validation and check-digit derivation |
//! | `vat` | VAT number validation, VIES eligibility |
//! | `identity` | National ID and tax number validators |
//! | `bank` | Bank routing and account number validators |
//! | `payref` | Structured payment references (RF, OGM, KID, ESR, …) |
//! | `securities` | CUSIP / ISIN check digits |
//! | `registry` | Country registry, resolution policy, global routers |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod checksum;

#[cfg(feature = "core")]
pub mod rules;

#[cfg(feature = "iban")]
pub mod iban;

#[cfg(feature = "identity")]
pub mod identity;

#[cfg(feature = "vat")]
pub mod vat;

#[cfg(feature = "bank")]
pub mod bank;

#[cfg(feature = "payref")]
pub mod payref;

#[cfg(feature = "securities")]
pub mod securities;

#[cfg(feature = "registry")]
pub mod registry;

// Re-export core result types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::{ValidationError, ValidationErrorCode, ValidationResult};
