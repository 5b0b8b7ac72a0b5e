use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::hijri::HijriDate;

/// The invoice being composed or edited.
///
/// Derived totals are cached in [`Invoice::totals`] and must be refreshed
/// after every item mutation (see [`calculate_totals`](super::calculate_totals)
/// and [`InvoiceDraft`](super::InvoiceDraft)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice number, assigned by the backend.
    pub number: String,
    /// Standard, simplified, credit or debit note.
    pub invoice_type: InvoiceType,
    /// ISO 4217 currency code (e.g. "SAR").
    pub currency: String,
    /// Payment terms free text.
    pub payment_terms: Option<String>,
    /// Lifecycle status.
    pub status: InvoiceStatus,
    /// Issue date/time stamp, present only while the status is `Issued`.
    pub issue: Option<IssueStamp>,
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Cached aggregate totals.
    pub totals: Totals,
    /// Buyer details, copied from the client record at selection time.
    pub buyer: Buyer,
    /// Identifier of the seller company profile.
    pub seller_id: String,
}

/// Gregorian and Hijri issue stamp. Set and cleared as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueStamp {
    pub date_gregorian: NaiveDate,
    pub time_gregorian: NaiveTime,
    pub date_hijri: HijriDate,
}

impl IssueStamp {
    /// Issue date and time combined.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date_gregorian.and_time(self.time_gregorian)
    }
}

/// One billable row on an invoice.
///
/// Input fields are public. The derived amounts are private and only
/// written by [`recompute`](super::recompute), so they are always a pure
/// function of quantity, unit price, discount and VAT rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description_en: String,
    pub description_ar: String,
    pub category: ItemCategory,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Discount percentage, 0 to 100.
    pub discount: Decimal,
    /// VAT rate percentage.
    pub vat_rate: Decimal,
    #[serde(default)]
    pub(crate) total_excluding_vat: Decimal,
    #[serde(default)]
    pub(crate) vat_amount: Decimal,
    #[serde(default)]
    pub(crate) total_including_vat: Decimal,
}

impl LineItem {
    /// Taxable base after discount.
    pub fn total_excluding_vat(&self) -> Decimal {
        self.total_excluding_vat
    }

    pub fn vat_amount(&self) -> Decimal {
        self.vat_amount
    }

    pub fn total_including_vat(&self) -> Decimal {
        self.total_including_vat
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Service,
    Product,
}

/// Invoice-level sums over all line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of item `total_excluding_vat`.
    pub subtotal_excluding_vat: Decimal,
    /// Sum of item `vat_amount`.
    pub total_vat_amount: Decimal,
    /// `subtotal_excluding_vat + total_vat_amount`.
    pub subtotal_including_vat: Decimal,
}

/// ZATCA invoice type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    /// Standard tax invoice (B2B).
    Standard,
    /// Simplified tax invoice (B2C).
    Simplified,
    /// Credit note.
    Credit,
    /// Debit note.
    Debit,
}

impl InvoiceType {
    /// UNTDID 1001 document code used by ZATCA.
    pub fn code(&self) -> u16 {
        match self {
            Self::Standard | Self::Simplified => 388,
            Self::Credit => 381,
            Self::Debit => 383,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Simplified => "Simplified",
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Only drafts allow unrestricted item-list changes.
    pub fn permits_item_edits(&self) -> bool {
        matches!(self, Self::Draft)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Issued => "Issued",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Buyer classification. B2B buyers must carry a VAT number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuyerType {
    B2B,
    B2C,
}

/// Buyer party embedded in the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub buyer_type: BuyerType,
    pub name_en: String,
    pub name_ar: String,
    pub vat_number: Option<String>,
    pub address: Address,
    pub contact: Contact,
}

/// Postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line_en: Option<String>,
    pub line_ar: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Seller company profile. Owned by the company settings, referenced by
/// invoices through [`Invoice::seller_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerProfile {
    pub id: String,
    pub company_name_en: String,
    pub company_name_ar: String,
    /// 15-character ZATCA VAT registration number.
    pub vat_number: String,
    /// Commercial registration number.
    pub cr_number: String,
    pub address_en: Option<String>,
    pub address_ar: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub iban: Option<String>,
    pub bank_name: Option<String>,
    pub swift_code: Option<String>,
}

/// Client record as stored by the client-management backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_name_eng: String,
    #[serde(default)]
    pub client_name_arb: String,
    #[serde(default)]
    pub vat_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub address_eng: Option<String>,
    #[serde(default)]
    pub address_arb: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl Buyer {
    /// Copy a client record into a buyer. A non-blank VAT number makes the
    /// buyer B2B. Later changes to the client do not affect the invoice.
    pub fn from_client(client: &ClientRecord) -> Self {
        let vat_number = client
            .vat_number
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from);
        let buyer_type = if vat_number.is_some() {
            BuyerType::B2B
        } else {
            BuyerType::B2C
        };

        Self {
            buyer_type,
            name_en: client.client_name_eng.clone(),
            name_ar: client.client_name_arb.clone(),
            vat_number,
            address: Address {
                line_en: client.address_eng.clone(),
                line_ar: client.address_arb.clone(),
                city: client.city.clone(),
                postal_code: client.postal_code.clone(),
                country_code: "SA".to_string(),
            },
            contact: Contact {
                person: client.contact_person.clone(),
                phone: client.phone.clone(),
                email: client.email.clone(),
            },
        }
    }
}
