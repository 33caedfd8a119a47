use finident::vat::*;

fn main() {
    // VAT number validation across member states
    println!("=== VAT Number Validation ===\n");

    let test_ids = [
        "DE136695976",
        "ATU13585627",
        "FR40303265045",
        "NL004495445B01",
        "EL094259216",
        "GR094259216", // ISO spelling, folded to EL
        "XI980780684",
        "DE136695977",  // wrong check digit
        "XX999999999",  // unknown country
    ];

    for id in &test_ids {
        let result = validate_vat(id);
        if result.is_valid() {
            println!("  {id} => valid");
        } else {
            for error in result.errors() {
                println!("  {id} => INVALID: [{:?}] {}", error.code, error.message);
            }
        }
    }

    // Structured view with VIES eligibility
    println!("\n=== Parsed Details ===\n");

    for id in ["GR 094259216", "XI980780684", "NL 0044.95.445.B01"] {
        match parse_vat(id) {
            Some(details) => println!(
                "  {id} => country={}, number={}, eu={}, vies={}",
                details.country_code, details.number, details.is_eu_vat, details.is_vies_eligible
            ),
            None => println!("  {id} => not a valid VAT number"),
        }
    }

    // Validating a bare national part against a known country
    println!("\n=== Country-Pinned Validation ===\n");

    for (cc, number) in [("DE", "136695976"), ("IT", "00743110157"), ("IT", "0074311015")] {
        let result = validate_vat_for(cc, number);
        println!("  {cc} / {number} => {}", if result.is_valid() { "valid" } else { "invalid" });
    }
}
