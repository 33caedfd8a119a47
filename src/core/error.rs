use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that indicate programmer mistakes, not malformed identifier data.
///
/// Malformed *input* never produces one of these — it always yields a
/// [`ValidationResult`] failure value. This enum covers misuse of the
/// library itself.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FinidentError {
    /// A rule descriptor's field layout does not tile its declared length.
    #[error("rule descriptor error: {0}")]
    Descriptor(String),

    /// A format/details helper was called on a value that never passed
    /// validation.
    #[error("value was not validated: {0}")]
    NotValidated(String),
}

/// Closed taxonomy of validation failure codes.
///
/// `InvalidCheckDigit` covers a single terminal check character;
/// `InvalidChecksum` covers a checksum validating a whole segment. Both
/// exist across countries and stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorCode {
    /// Null, empty, or whitespace-only input.
    InvalidInput,
    /// Input length differs from the expected length.
    InvalidLength,
    /// A character class or structural pattern was violated.
    InvalidFormat,
    /// A whole-segment checksum did not verify.
    InvalidChecksum,
    /// A single terminal check digit did not match.
    InvalidCheckDigit,
    /// A single terminal check letter did not match.
    InvalidCheckLetter,
    /// The country prefix is not a valid ISO 3166 alpha-2 code.
    InvalidCountryCode,
    /// No validator is registered for this identifier kind and country.
    UnsupportedCountry,
}

impl ValidationErrorCode {
    /// Stable string form of the code (e.g. for logs or serialized reports).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::InvalidLength => "InvalidLength",
            Self::InvalidFormat => "InvalidFormat",
            Self::InvalidChecksum => "InvalidChecksum",
            Self::InvalidCheckDigit => "InvalidCheckDigit",
            Self::InvalidCheckLetter => "InvalidCheckLetter",
            Self::InvalidCountryCode => "InvalidCountryCode",
            Self::UnsupportedCountry => "UnsupportedCountry",
        }
    }
}

/// A single validation error with its code and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Which rule category failed.
    pub code: ValidationErrorCode,
    /// Human-readable, non-localized diagnostic.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl ValidationError {
    /// Create a validation error.
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of validating one identifier. Immutable once constructed.
///
/// Valid ⇔ the error list is empty; a failure always carries at least
/// one error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A successful result with no errors.
    pub fn ok() -> Self {
        Self { errors: Vec::new() }
    }

    /// A failure carrying a single error.
    pub fn fail(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ValidationError::new(code, message)],
        }
    }

    /// A failure carrying the given errors.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty — an empty error list is the success
    /// state and must be constructed via [`ValidationResult::ok`].
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        assert!(
            !errors.is_empty(),
            "ValidationResult::from_errors requires at least one error"
        );
        Self { errors }
    }

    /// Whether the identifier passed all checks.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The errors, in the order they were detected.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Code of the first error, if any.
    pub fn first_code(&self) -> Option<ValidationErrorCode> {
        self.errors.first().map(|e| e.code)
    }
}
