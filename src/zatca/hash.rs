//! Deterministic invoice hash and signature tokens.
//!
//! Both are one-way SHA-256 digests rendered as uppercase hex. They are
//! stable identifiers for an issued invoice, not ZATCA Phase 2
//! cryptographic stamps (those need the taxpayer's private key).

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::core::format_money;

/// Length of [`zatca_hash`] output.
pub const HASH_LEN: usize = 64;
/// Length of [`digital_signature`] output.
pub const SIGNATURE_LEN: usize = 32;

/// Invoice hash over number, total, timestamp and seller VAT number.
pub fn zatca_hash(
    invoice_number: &str,
    total: Decimal,
    timestamp: NaiveDateTime,
    seller_vat: &str,
) -> String {
    digest_hex(&[
        "INVOICE-HASH",
        invoice_number,
        &format_money(total),
        &ts(timestamp),
        seller_vat,
    ])
}

/// Signature token over number, total, timestamp and seller CR number.
pub fn digital_signature(
    invoice_number: &str,
    total: Decimal,
    timestamp: NaiveDateTime,
    cr_number: &str,
) -> String {
    let mut hex = digest_hex(&[
        "SIGNATURE",
        invoice_number,
        &format_money(total),
        &ts(timestamp),
        cr_number,
    ]);
    hex.truncate(SIGNATURE_LEN);
    hex
}

fn ts(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Each part is prefixed with its byte length (u64, big-endian), so no
/// two different part lists feed the digest the same bytes.
fn digest_hex(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part.as_bytes());
    }
    hex::encode_upper(hasher.finalize())
}
