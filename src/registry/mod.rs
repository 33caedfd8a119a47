//! Country registry and global dispatch.
//!
//! Every validator in the crate is a free function; this module registers
//! them, country by country, in an explicit table built once behind a
//! [`LazyLock`]. Nothing is discovered dynamically: adding a country means
//! adding a registration line, which keeps the full dispatch surface
//! greppable.
//!
//! IBAN and VAT lookups resolve through a region shelf (country → region →
//! candidates), the remaining identifier kinds through a flat shelf; both
//! paths share one resolver and one resolution policy.
//!
//! # Example
//!
//! ```rust
//! use finident::registry::{self, Registry};
//! use finident::rules::IdentifierKind;
//!
//! assert!(registry::validate_iban("BE68 5390 0754 7034").is_valid());
//! assert!(Registry::global()
//!     .validate(IdentifierKind::Vat, "DE", "136695976")
//!     .is_valid());
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::bank;
use crate::core::{
    Region, ValidationErrorCode, ValidationResult, country_prefix, normalize, region_of,
};
use crate::iban;
use crate::identity;
use crate::payref::{self, PaymentReferenceFormat};
use crate::rules::IdentifierKind;
use crate::vat;

/// A registered per-country validator.
///
/// Implemented for any `Fn(&str) -> ValidationResult`, so registrations are
/// either free functions or small closures binding a country code.
pub trait CountryValidator: Send + Sync {
    fn validate(&self, value: &str) -> ValidationResult;
}

impl<F> CountryValidator for F
where
    F: Fn(&str) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &str) -> ValidationResult {
        self(value)
    }
}

type Candidates = Vec<Box<dyn CountryValidator>>;
type Shelf = HashMap<&'static str, Candidates>;

/// The statically-registered validator table.
pub struct Registry {
    regional: HashMap<(IdentifierKind, Region), Shelf>,
    flat: HashMap<IdentifierKind, Shelf>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::build);

impl Registry {
    /// The process-wide registry, built on first use. Read-only afterwards,
    /// so concurrent lookups need no locking.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    fn build() -> Registry {
        // The declarative BBAN rules back the whole IBAN shelf; reject a
        // malformed layout table before registering anything on top of it.
        for rule in iban::rules() {
            rule.verify_layout()
                .unwrap_or_else(|e| panic!("BBAN rule table: {e}"));
        }

        let mut registry = Registry {
            regional: HashMap::new(),
            flat: HashMap::new(),
        };

        for cc in iban::supported_countries() {
            registry.register(
                IdentifierKind::Iban,
                cc,
                Box::new(move |v: &str| iban::validate_iban_for(cc, v)),
            );
            registry.register(
                IdentifierKind::Bban,
                cc,
                Box::new(move |v: &str| iban::validate_bban(cc, v)),
            );
        }

        for &cc in vat::SUPPORTED_COUNTRIES {
            registry.register(
                IdentifierKind::Vat,
                cc,
                Box::new(move |v: &str| vat::validate_vat_for(cc, v)),
            );
        }

        use IdentifierKind::{BankAccount, BankRouting, NationalId, PaymentReference, TaxId};
        registry.register(NationalId, "BE", Box::new(identity::validate_be_national_number));
        registry.register(NationalId, "ES", Box::new(identity::validate_es_dni));
        registry.register(NationalId, "FR", Box::new(identity::validate_fr_nir));
        registry.register(NationalId, "IT", Box::new(identity::validate_it_codice_fiscale));
        registry.register(NationalId, "NL", Box::new(identity::validate_nl_bsn));
        registry.register(NationalId, "NO", Box::new(identity::validate_no_fodselsnummer));
        registry.register(NationalId, "SE", Box::new(identity::validate_se_personnummer));

        registry.register(TaxId, "BE", Box::new(identity::validate_be_enterprise_number));
        registry.register(TaxId, "DE", Box::new(identity::validate_de_steuer_id));
        registry.register(TaxId, "FR", Box::new(identity::validate_fr_siren_or_siret));

        for cc in ["US", "GB", "DE"] {
            registry.register(
                BankRouting,
                cc,
                Box::new(move |v: &str| bank::validate_routing_number(cc, v)),
            );
        }
        for cc in ["FR", "NL"] {
            registry.register(
                BankAccount,
                cc,
                Box::new(move |v: &str| bank::validate_account_number(cc, v)),
            );
        }

        for (cc, format) in [
            ("BE", PaymentReferenceFormat::LocalBelgian),
            ("CH", PaymentReferenceFormat::LocalSwitzerland),
            ("FI", PaymentReferenceFormat::LocalFinland),
            ("IT", PaymentReferenceFormat::LocalItaly),
            ("SE", PaymentReferenceFormat::LocalSweden),
            ("SI", PaymentReferenceFormat::LocalSlovenia),
        ] {
            registry.register(
                PaymentReference,
                cc,
                Box::new(move |v: &str| payref::validate_reference(v, format)),
            );
        }
        // Norwegian creditors issue KIDs under either scheme, so both are
        // registered as candidates for the same country.
        registry.register(
            PaymentReference,
            "NO",
            Box::new(payref::validate_norwegian_kid_mod10),
        );
        registry.register(
            PaymentReference,
            "NO",
            Box::new(payref::validate_norwegian_kid_mod11),
        );

        registry
    }

    fn register(
        &mut self,
        kind: IdentifierKind,
        cc: &'static str,
        validator: Box<dyn CountryValidator>,
    ) {
        let shelf = match kind {
            IdentifierKind::Iban | IdentifierKind::Vat => {
                let region =
                    region_of(cc).unwrap_or_else(|| panic!("country '{cc}' has no region"));
                self.regional.entry((kind, region)).or_default()
            }
            _ => self.flat.entry(kind).or_default(),
        };
        shelf.entry(cc).or_default().push(validator);
    }

    fn candidates(&self, kind: IdentifierKind, cc: &str) -> Option<&Candidates> {
        let shelf = match kind {
            IdentifierKind::Iban | IdentifierKind::Vat => {
                self.regional.get(&(kind, region_of(cc)?))?
            }
            _ => self.flat.get(&kind)?,
        };
        shelf.get(cc)
    }

    /// Validate `value` as identifier `kind` of country `cc`.
    ///
    /// Resolution is deliberately asymmetric. A country with exactly one
    /// registered validator returns that validator's errors verbatim. A
    /// country with several candidates accepts on the first success but,
    /// when all reject, reports only a generic `InvalidFormat`: the
    /// candidates' specific complaints contradict each other, and
    /// forwarding one of them would misattribute the failure to a scheme
    /// the value never claimed to follow.
    pub fn validate(&self, kind: IdentifierKind, cc: &str, value: &str) -> ValidationResult {
        let mut cc = cc.to_ascii_uppercase();
        if kind == IdentifierKind::Vat && cc == "GR" {
            cc = "EL".to_owned();
        }
        let Some(candidates) = self.candidates(kind, &cc).filter(|c| !c.is_empty()) else {
            return ValidationResult::fail(
                ValidationErrorCode::UnsupportedCountry,
                format!("no {kind:?} validator registered for country '{cc}'"),
            );
        };
        if let [single] = candidates.as_slice() {
            return single.validate(value);
        }
        for candidate in candidates {
            if candidate.validate(value).is_valid() {
                return ValidationResult::ok();
            }
        }
        ValidationResult::fail(
            ValidationErrorCode::InvalidFormat,
            format!("value matches none of the {kind:?} schemes registered for '{cc}'"),
        )
    }

    /// Countries with at least one validator for `kind`, sorted.
    pub fn supported_countries(&self, kind: IdentifierKind) -> Vec<&'static str> {
        let mut countries: Vec<&'static str> = match kind {
            IdentifierKind::Iban | IdentifierKind::Vat => self
                .regional
                .iter()
                .filter(|((k, _), _)| *k == kind)
                .flat_map(|(_, shelf)| shelf.keys().copied())
                .collect(),
            _ => self
                .flat
                .get(&kind)
                .map(|shelf| shelf.keys().copied().collect())
                .unwrap_or_default(),
        };
        countries.sort_unstable();
        countries
    }
}

/// Validate an IBAN, routing through the registry by inferred country.
pub fn validate_iban(value: &str) -> ValidationResult {
    dispatch_by_prefix(IdentifierKind::Iban, value, "IBAN")
}

/// Validate a VAT number, routing through the registry by inferred prefix.
pub fn validate_vat(value: &str) -> ValidationResult {
    dispatch_by_prefix(IdentifierKind::Vat, value, "VAT number")
}

/// Validate a national ID through the registry.
pub fn validate_national_id(cc: &str, value: &str) -> ValidationResult {
    Registry::global().validate(IdentifierKind::NationalId, cc, value)
}

/// Validate a tax/company number through the registry.
pub fn validate_tax_id(cc: &str, value: &str) -> ValidationResult {
    Registry::global().validate(IdentifierKind::TaxId, cc, value)
}

fn dispatch_by_prefix(kind: IdentifierKind, value: &str, what: &str) -> ValidationResult {
    let normalized = normalize(value);
    if normalized.is_empty() {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidInput,
            "input is empty or whitespace-only",
        );
    }
    let Some(cc) = country_prefix(&normalized) else {
        return ValidationResult::fail(
            ValidationErrorCode::InvalidCountryCode,
            format!("{what} must start with a 2-letter country code"),
        );
    };
    Registry::global().validate(kind, &cc.to_owned(), value)
}
