use finident::iban::*;

fn main() {
    // IBAN validation with national BBAN checks
    println!("=== IBAN Validation ===\n");

    let test_ibans = [
        "BE68 5390 0754 7034",
        "DE89 3704 0044 0532 0130 00",
        "FR14 2004 1010 0505 0001 3M02 606",
        "NO93 8601 1117 947",
        "BE68 5390 0754 7035", // envelope broken
        "DE88 3704 0044 0532 0130 00", // wrong check digits
        "US12 3456 7890 1234", // no such scheme
    ];

    for value in &test_ibans {
        let result = validate_iban(value);
        if result.is_valid() {
            println!("  {value} => valid");
        } else {
            for error in result.errors() {
                println!("  {value} => INVALID: [{:?}] {}", error.code, error.message);
            }
        }
    }

    // Structured decomposition
    println!("\n=== Decomposition ===\n");

    for value in ["FR1420041010050500013M02606", "IT60X0542811101000000123456"] {
        match parse_iban(value) {
            Some(details) => {
                println!("  {value}:");
                println!("    bank     = {}", details.bank_code.as_deref().unwrap_or("—"));
                println!("    branch   = {}", details.branch_code.as_deref().unwrap_or("—"));
                println!("    account  = {}", details.account_number.as_deref().unwrap_or("—"));
                println!(
                    "    nat. key = {}",
                    details.national_check_digits.as_deref().unwrap_or("—")
                );
            }
            None => println!("  {value}: not a valid IBAN"),
        }
    }

    // Check digit derivation
    println!("\n=== Check Digit Derivation ===\n");

    let pairs = [("BE", "539007547034"), ("GB", "NWBK60161331926819")];
    for (cc, bban) in &pairs {
        match derive_check_digits(cc, bban) {
            Some(digits) => println!("  {cc} + {bban} => {cc}{digits}{bban}"),
            None => println!("  {cc} + {bban} => BBAN does not fit the national layout"),
        }
    }
}
