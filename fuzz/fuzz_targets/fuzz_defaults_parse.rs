#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = fawtara::core::InvoiceDefaults::from_json_str(s);
        if let Ok(client) = serde_json::from_str::<fawtara::core::ClientRecord>(s) {
            let _ = fawtara::core::Buyer::from_client(&client);
        }
    }
});
