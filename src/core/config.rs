use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use super::error::FawtaraError;
use super::types::InvoiceType;

/// Defaults applied when composing new invoices and line items.
///
/// Every field is optional in the JSON form; missing fields take the
/// Saudi defaults below.
///
/// ```
/// use fawtara::core::InvoiceDefaults;
///
/// let defaults = InvoiceDefaults::from_json_str(r#"{ "payment_terms": "Net 30" }"#).unwrap();
/// assert_eq!(defaults.currency, "SAR");
/// assert_eq!(defaults.payment_terms.as_deref(), Some("Net 30"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InvoiceDefaults {
    /// ISO 4217 currency code. Default: "SAR".
    pub currency: String,
    /// VAT rate percentage for new line items. Default: 15.
    pub vat_rate: Decimal,
    /// Default: Standard.
    pub invoice_type: InvoiceType,
    pub payment_terms: Option<String>,
    /// Required length of the seller VAT number. Default: 15.
    pub seller_vat_length: usize,
}

impl Default for InvoiceDefaults {
    fn default() -> Self {
        Self {
            currency: "SAR".to_string(),
            vat_rate: dec!(15),
            invoice_type: InvoiceType::Standard,
            payment_terms: None,
            seller_vat_length: 15,
        }
    }
}

impl InvoiceDefaults {
    /// Parse defaults from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, FawtaraError> {
        serde_json::from_str(json).map_err(|e| FawtaraError::Config(e.to_string()))
    }
}
