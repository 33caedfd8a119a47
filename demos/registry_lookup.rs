use finident::registry::{self, Registry};
use finident::rules::IdentifierKind;

fn main() {
    let registry = Registry::global();

    // One dispatcher, every identifier family
    println!("=== Registry Dispatch ===\n");

    let probes = [
        (IdentifierKind::Iban, "BE", "BE68539007547034"),
        (IdentifierKind::Bban, "BE", "539007547034"),
        (IdentifierKind::Vat, "SE", "556012579001"),
        (IdentifierKind::NationalId, "NO", "01019050188"),
        (IdentifierKind::TaxId, "FR", "44306184100047"),
        (IdentifierKind::BankRouting, "US", "011000015"),
        (IdentifierKind::BankAccount, "NL", "0417164300"),
        (IdentifierKind::PaymentReference, "NO", "0365327"),
        (IdentifierKind::Iban, "US", "US12345678901234"),
    ];

    for (kind, cc, value) in &probes {
        let result = registry.validate(*kind, cc, value);
        if result.is_valid() {
            println!("  {kind:?} / {cc} / {value} => valid");
        } else {
            let error = &result.errors()[0];
            println!("  {kind:?} / {cc} / {value} => [{:?}] {}", error.code, error.message);
        }
    }

    // Coverage per identifier kind
    println!("\n=== Supported Countries ===\n");

    for kind in [
        IdentifierKind::Vat,
        IdentifierKind::BankRouting,
        IdentifierKind::BankAccount,
        IdentifierKind::PaymentReference,
    ] {
        let countries = registry.supported_countries(kind);
        println!("  {kind:?}: {} countries ({})", countries.len(), countries.join(", "));
    }

    // Prefix-inferring routers
    println!("\n=== Global Routers ===\n");

    for value in ["DE89370400440532013000", "ATU13585627"] {
        let iban = registry::validate_iban(value);
        let vat = registry::validate_vat(value);
        println!("  {value} => iban={}, vat={}", iban.is_valid(), vat.is_valid());
    }
}
