//! QR payload construction and encoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{FawtaraError, format_money};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Data rendered into the invoice QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPayload {
    pub seller_name: String,
    pub vat_number: String,
    pub invoice_number: String,
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    pub item_count: usize,
    /// Invoice total including VAT.
    pub total: Decimal,
    pub vat_amount: Decimal,
}

impl QrPayload {
    /// Base64 of the JSON object. Field order is fixed, so the output is
    /// deterministic for equal payloads.
    pub fn encode(&self) -> Result<String, FawtaraError> {
        let json = serde_json::to_vec(self).map_err(|e| FawtaraError::Encoding(e.to_string()))?;
        Ok(STANDARD.encode(json))
    }

    /// Inverse of [`encode`](Self::encode).
    pub fn decode(data: &str) -> Result<Self, FawtaraError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| FawtaraError::Encoding(format!("invalid base64: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| FawtaraError::Encoding(e.to_string()))
    }

    /// ZATCA Phase 1 TLV form (tags 1 to 5), base64 encoded.
    pub fn to_tlv_base64(&self) -> Result<String, FawtaraError> {
        TlvFields {
            seller_name: self.seller_name.clone(),
            vat_number: self.vat_number.clone(),
            timestamp: self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            total: format_money(self.total),
            vat_amount: format_money(self.vat_amount),
        }
        .encode()
    }
}

/// The five ZATCA Phase 1 QR fields as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvFields {
    /// Tag 1.
    pub seller_name: String,
    /// Tag 2.
    pub vat_number: String,
    /// Tag 3, ISO 8601.
    pub timestamp: String,
    /// Tag 4.
    pub total: String,
    /// Tag 5.
    pub vat_amount: String,
}

impl TlvFields {
    /// Tag byte, length byte, UTF-8 value; repeated for tags 1 to 5.
    pub fn encode(&self) -> Result<String, FawtaraError> {
        let mut buf = Vec::new();
        for (tag, value) in self.tagged() {
            let bytes = value.as_bytes();
            let len = u8::try_from(bytes.len()).map_err(|_| {
                FawtaraError::Encoding(format!(
                    "TLV tag {tag} value is {} bytes, maximum is 255",
                    bytes.len()
                ))
            })?;
            buf.push(tag);
            buf.push(len);
            buf.extend_from_slice(bytes);
        }
        Ok(STANDARD.encode(buf))
    }

    pub fn decode(data: &str) -> Result<Self, FawtaraError> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| FawtaraError::Encoding(format!("invalid base64: {e}")))?;

        let mut values: [Option<String>; 5] = Default::default();
        let mut pos = 0;
        while pos < bytes.len() {
            let (tag, len) = match (bytes.get(pos), bytes.get(pos + 1)) {
                (Some(&t), Some(&l)) => (t, l as usize),
                _ => return Err(FawtaraError::Encoding("truncated TLV header".into())),
            };
            let value = bytes
                .get(pos + 2..pos + 2 + len)
                .ok_or_else(|| FawtaraError::Encoding(format!("truncated TLV value for tag {tag}")))?;
            let text = std::str::from_utf8(value)
                .map_err(|_| FawtaraError::Encoding(format!("tag {tag} is not valid UTF-8")))?;

            match tag {
                1..=5 => values[usize::from(tag) - 1] = Some(text.to_string()),
                _ => return Err(FawtaraError::Encoding(format!("unknown TLV tag {tag}"))),
            }
            pos += 2 + len;
        }

        let [seller_name, vat_number, timestamp, total, vat_amount] = values;
        let missing = |tag: u8| FawtaraError::Encoding(format!("missing TLV tag {tag}"));
        Ok(Self {
            seller_name: seller_name.ok_or_else(|| missing(1))?,
            vat_number: vat_number.ok_or_else(|| missing(2))?,
            timestamp: timestamp.ok_or_else(|| missing(3))?,
            total: total.ok_or_else(|| missing(4))?,
            vat_amount: vat_amount.ok_or_else(|| missing(5))?,
        })
    }

    fn tagged(&self) -> [(u8, &str); 5] {
        [
            (1, self.seller_name.as_str()),
            (2, self.vat_number.as_str()),
            (3, self.timestamp.as_str()),
            (4, self.total.as_str()),
            (5, self.vat_amount.as_str()),
        ]
    }
}

/// Build the QR payload value for an invoice.
pub fn generate_qr_code_data(payload: &QrPayload) -> Result<String, FawtaraError> {
    payload.encode()
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let s = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
