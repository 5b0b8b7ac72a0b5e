use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calc::{apply_recompute, calculate_totals};
use super::config::InvoiceDefaults;
use super::error::FawtaraError;
use super::types::*;

/// Builder for constructing invoices.
///
/// `build()` computes every line item and the invoice totals; it does not
/// validate. Validation runs before submission (see
/// [`validate_invoice`](super::validate_invoice)).
///
/// ```
/// use fawtara::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("INV-2024-001")
///     .seller_id("company-1")
///     .buyer(BuyerBuilder::b2c("Walk-in customer").build())
///     .add_item(LineItemBuilder::new("Site survey", dec!(2), dec!(100))
///         .discount(dec!(10))
///         .build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals.subtotal_including_vat, dec!(207));
/// ```
pub struct InvoiceBuilder {
    number: String,
    invoice_type: InvoiceType,
    currency: String,
    payment_terms: Option<String>,
    status: InvoiceStatus,
    items: Vec<LineItem>,
    buyer: Option<Buyer>,
    seller_id: Option<String>,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>) -> Self {
        Self::with_defaults(number, &InvoiceDefaults::default())
    }

    pub fn with_defaults(number: impl Into<String>, defaults: &InvoiceDefaults) -> Self {
        Self {
            number: number.into(),
            invoice_type: defaults.invoice_type,
            currency: defaults.currency.clone(),
            payment_terms: defaults.payment_terms.clone(),
            status: InvoiceStatus::Draft,
            items: Vec::new(),
            buyer: None,
            seller_id: None,
        }
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = invoice_type;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    /// Initial status. Use [`InvoiceDraft::set_status`](super::InvoiceDraft::set_status)
    /// to move to `Issued` so the issue stamp is applied.
    pub fn status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }

    pub fn buyer(mut self, buyer: Buyer) -> Self {
        self.buyer = Some(buyer);
        self
    }

    pub fn seller_id(mut self, id: impl Into<String>) -> Self {
        self.seller_id = Some(id.into());
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Build the invoice, computing item amounts and totals.
    pub fn build(self) -> Result<Invoice, FawtaraError> {
        let buyer = self
            .buyer
            .ok_or_else(|| FawtaraError::Builder("buyer is required".into()))?;
        let seller_id = self
            .seller_id
            .ok_or_else(|| FawtaraError::Builder("seller id is required".into()))?;

        if self.items.len() > 10_000 {
            return Err(FawtaraError::Builder(
                "invoice cannot have more than 10,000 line items".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(FawtaraError::Builder(
                "invoice number cannot exceed 200 characters".into(),
            ));
        }

        let mut invoice = Invoice {
            number: self.number,
            invoice_type: self.invoice_type,
            currency: self.currency,
            payment_terms: self.payment_terms,
            status: self.status,
            issue: None,
            items: self.items,
            totals: Totals::default(),
            buyer,
            seller_id,
        };

        calculate_totals(&mut invoice)?;
        Ok(invoice)
    }
}

/// Builder for LineItem. VAT rate defaults to 15%.
pub struct LineItemBuilder {
    description_en: String,
    description_ar: String,
    category: ItemCategory,
    quantity: Decimal,
    unit_price: Decimal,
    discount: Decimal,
    vat_rate: Decimal,
}

impl LineItemBuilder {
    pub fn new(description_en: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description_en: description_en.into(),
            description_ar: String::new(),
            category: ItemCategory::Service,
            quantity,
            unit_price,
            discount: Decimal::ZERO,
            vat_rate: dec!(15),
        }
    }

    /// Start from the configured default VAT rate.
    pub fn with_defaults(
        description_en: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        defaults: &InvoiceDefaults,
    ) -> Self {
        Self::new(description_en, quantity, unit_price).vat_rate(defaults.vat_rate)
    }

    pub fn description_ar(mut self, description: impl Into<String>) -> Self {
        self.description_ar = description.into();
        self
    }

    pub fn category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Discount percentage (0 to 100).
    pub fn discount(mut self, percent: Decimal) -> Self {
        self.discount = percent;
        self
    }

    pub fn vat_rate(mut self, percent: Decimal) -> Self {
        self.vat_rate = percent;
        self
    }

    /// Build the item with its derived amounts. If they overflow, the
    /// amounts stay zero and the overflow is reported again when the item
    /// enters an invoice or draft.
    pub fn build(self) -> LineItem {
        let mut item = LineItem {
            description_en: self.description_en,
            description_ar: self.description_ar,
            category: self.category,
            quantity: self.quantity,
            unit_price: self.unit_price,
            discount: self.discount,
            vat_rate: self.vat_rate,
            total_excluding_vat: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            total_including_vat: Decimal::ZERO,
        };
        if let Err(e) = apply_recompute(&mut item) {
            tracing::warn!(item = %item.description_en, error = %e, "line item amounts not computed");
        }
        item
    }
}

/// Builder for Buyer.
pub struct BuyerBuilder {
    buyer_type: BuyerType,
    name_en: String,
    name_ar: String,
    vat_number: Option<String>,
    address: Address,
    contact: Contact,
}

impl BuyerBuilder {
    /// Business buyer. A VAT number is required before submission.
    pub fn b2b(name_en: impl Into<String>) -> Self {
        Self::new(BuyerType::B2B, name_en)
    }

    /// Consumer buyer. No VAT number required.
    pub fn b2c(name_en: impl Into<String>) -> Self {
        Self::new(BuyerType::B2C, name_en)
    }

    fn new(buyer_type: BuyerType, name_en: impl Into<String>) -> Self {
        Self {
            buyer_type,
            name_en: name_en.into(),
            name_ar: String::new(),
            vat_number: None,
            address: AddressBuilder::new("SA").build(),
            contact: Contact::default(),
        }
    }

    pub fn name_ar(mut self, name: impl Into<String>) -> Self {
        self.name_ar = name.into();
        self
    }

    pub fn vat_number(mut self, vat: impl Into<String>) -> Self {
        self.vat_number = Some(vat.into());
        self
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn contact(
        mut self,
        person: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Self {
        self.contact = Contact {
            person,
            phone,
            email,
        };
        self
    }

    pub fn build(self) -> Buyer {
        Buyer {
            buyer_type: self.buyer_type,
            name_en: self.name_en,
            name_ar: self.name_ar,
            vat_number: self.vat_number,
            address: self.address,
            contact: self.contact,
        }
    }
}

/// Builder for Address.
pub struct AddressBuilder {
    line_en: Option<String>,
    line_ar: Option<String>,
    city: Option<String>,
    postal_code: Option<String>,
    country_code: String,
}

impl AddressBuilder {
    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            line_en: None,
            line_ar: None,
            city: None,
            postal_code: None,
            country_code: country_code.into(),
        }
    }

    pub fn line_en(mut self, line: impl Into<String>) -> Self {
        self.line_en = Some(line.into());
        self
    }

    pub fn line_ar(mut self, line: impl Into<String>) -> Self {
        self.line_ar = Some(line.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn postal_code(mut self, code: impl Into<String>) -> Self {
        self.postal_code = Some(code.into());
        self
    }

    pub fn build(self) -> Address {
        Address {
            line_en: self.line_en,
            line_ar: self.line_ar,
            city: self.city,
            postal_code: self.postal_code,
            country_code: self.country_code,
        }
    }
}

/// Builder for SellerProfile.
pub struct SellerProfileBuilder {
    profile: SellerProfile,
}

impl SellerProfileBuilder {
    pub fn new(
        id: impl Into<String>,
        company_name_en: impl Into<String>,
        vat_number: impl Into<String>,
        cr_number: impl Into<String>,
    ) -> Self {
        Self {
            profile: SellerProfile {
                id: id.into(),
                company_name_en: company_name_en.into(),
                company_name_ar: String::new(),
                vat_number: vat_number.into(),
                cr_number: cr_number.into(),
                address_en: None,
                address_ar: None,
                phone: None,
                email: None,
                iban: None,
                bank_name: None,
                swift_code: None,
            },
        }
    }

    pub fn company_name_ar(mut self, name: impl Into<String>) -> Self {
        self.profile.company_name_ar = name.into();
        self
    }

    pub fn address(mut self, en: impl Into<String>, ar: impl Into<String>) -> Self {
        self.profile.address_en = Some(en.into());
        self.profile.address_ar = Some(ar.into());
        self
    }

    pub fn contact(mut self, phone: impl Into<String>, email: impl Into<String>) -> Self {
        self.profile.phone = Some(phone.into());
        self.profile.email = Some(email.into());
        self
    }

    pub fn bank(
        mut self,
        bank_name: impl Into<String>,
        iban: impl Into<String>,
        swift_code: impl Into<String>,
    ) -> Self {
        self.profile.bank_name = Some(bank_name.into());
        self.profile.iban = Some(iban.into());
        self.profile.swift_code = Some(swift_code.into());
        self
    }

    pub fn build(self) -> SellerProfile {
        self.profile
    }
}
