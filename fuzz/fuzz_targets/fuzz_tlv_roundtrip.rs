#![no_main]

use fawtara::zatca::TlvFields;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (String, String, String, String, String)| {
    let fields = TlvFields {
        seller_name: data.0,
        vat_number: data.1,
        timestamp: data.2,
        total: data.3,
        vat_amount: data.4,
    };
    // Anything that encodes must decode back to the same fields.
    if let Ok(encoded) = fields.encode() {
        assert_eq!(TlvFields::decode(&encoded).ok(), Some(fields));
    }
});
