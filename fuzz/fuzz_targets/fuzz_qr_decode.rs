#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Decoding untrusted QR text must never panic.
        if let Ok(payload) = fawtara::zatca::QrPayload::decode(s) {
            let _ = payload.encode();
            let _ = payload.to_tlv_base64();
        }
        let _ = fawtara::zatca::TlvFields::decode(s);
    }
});
