use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calc::{recalc_totals, recompute};
use super::error::{FawtaraError, ValidationError, join_errors};
use super::types::*;

/// Required length of a ZATCA VAT registration number.
pub const VAT_NUMBER_LEN: usize = 15;

/// Validate an invoice before submission.
/// Returns all validation errors found (not just the first).
///
/// Negative quantities and prices, discounts outside 0..=100 and negative
/// VAT rates are accepted while editing and rejected here.
pub fn validate_invoice(invoice: &Invoice, seller: &SellerProfile) -> Vec<ValidationError> {
    validate_invoice_with(invoice, seller, VAT_NUMBER_LEN)
}

/// [`validate_invoice`] with a configurable seller VAT length
/// (see [`InvoiceDefaults::seller_vat_length`](super::InvoiceDefaults)).
pub fn validate_invoice_with(
    invoice: &Invoice,
    seller: &SellerProfile,
    seller_vat_length: usize,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if seller.vat_number.trim().chars().count() != seller_vat_length {
        errors.push(ValidationError::new(
            "seller.vat_number",
            format!("seller VAT number must be exactly {seller_vat_length} characters"),
        ));
    }

    validate_buyer(&invoice.buyer, &mut errors);

    // BR-16: An Invoice shall have at least one Invoice line
    if invoice.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "invoice must have at least one line item",
            "BR-16",
        ));
    }

    for (i, item) in invoice.items.iter().enumerate() {
        validate_item(item, i, &mut errors);
    }

    errors.extend(validate_arithmetic(invoice));

    errors
}

/// [`validate_invoice`] as a `Result`, joining all messages.
pub fn ensure_valid(invoice: &Invoice, seller: &SellerProfile) -> Result<(), FawtaraError> {
    ensure_valid_with(invoice, seller, VAT_NUMBER_LEN)
}

/// [`ensure_valid`] with a configurable seller VAT length.
pub fn ensure_valid_with(
    invoice: &Invoice,
    seller: &SellerProfile,
    seller_vat_length: usize,
) -> Result<(), FawtaraError> {
    let errors = validate_invoice_with(invoice, seller, seller_vat_length);
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(invoice = %invoice.number, count = errors.len(), "invoice failed validation");
        Err(FawtaraError::Validation(join_errors(&errors)))
    }
}

/// Check that cached item amounts and invoice totals match a fresh recompute.
pub fn validate_arithmetic(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, item) in invoice.items.iter().enumerate() {
        let fresh = match recompute(item) {
            Ok(fresh) => fresh,
            Err(e) => {
                errors.push(ValidationError::new(format!("items[{i}]"), e.to_string()));
                continue;
            }
        };
        if fresh != *item {
            errors.push(ValidationError::new(
                format!("items[{i}]"),
                format!(
                    "derived amounts are stale: total excluding VAT {} (expected {}), VAT {} (expected {})",
                    item.total_excluding_vat,
                    fresh.total_excluding_vat,
                    item.vat_amount,
                    fresh.vat_amount
                ),
            ));
        }
    }

    let totals = &invoice.totals;
    let expected = match recalc_totals(&invoice.items) {
        Ok(expected) => expected,
        Err(e) => {
            errors.push(ValidationError::new("totals", e.to_string()));
            return errors;
        }
    };

    if totals.subtotal_excluding_vat != expected.subtotal_excluding_vat {
        errors.push(ValidationError::new(
            "totals.subtotal_excluding_vat",
            format!(
                "subtotal {} does not match sum of items {}",
                totals.subtotal_excluding_vat, expected.subtotal_excluding_vat
            ),
        ));
    }

    if totals.total_vat_amount != expected.total_vat_amount {
        errors.push(ValidationError::new(
            "totals.total_vat_amount",
            format!(
                "VAT total {} does not match sum of items {}",
                totals.total_vat_amount, expected.total_vat_amount
            ),
        ));
    }

    let expected_gross = totals
        .subtotal_excluding_vat
        .checked_add(totals.total_vat_amount);
    if expected_gross != Some(totals.subtotal_including_vat) {
        errors.push(ValidationError::new(
            "totals.subtotal_including_vat",
            format!(
                "total {} does not match subtotal {} + VAT {}",
                totals.subtotal_including_vat,
                totals.subtotal_excluding_vat,
                totals.total_vat_amount
            ),
        ));
    }

    errors
}

fn validate_buyer(buyer: &Buyer, errors: &mut Vec<ValidationError>) {
    if buyer.name_en.trim().is_empty() && buyer.name_ar.trim().is_empty() {
        errors.push(ValidationError::new(
            "buyer.name",
            "buyer name must not be empty",
        ));
    }

    if buyer.buyer_type != BuyerType::B2B {
        return;
    }

    match buyer.vat_number.as_deref().map(str::trim) {
        None | Some("") => errors.push(ValidationError::new(
            "buyer.vat_number",
            "buyer VAT number is required for B2B invoices",
        )),
        Some(vat) => {
            if vat.len() != VAT_NUMBER_LEN || !vat.chars().all(|c| c.is_ascii_digit()) {
                errors.push(ValidationError::new(
                    "buyer.vat_number",
                    format!("buyer VAT number must be exactly {VAT_NUMBER_LEN} digits, got: '{vat}'"),
                ));
            }
        }
    }
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.quantity.is_sign_negative() && !item.quantity.is_zero() {
        errors.push(ValidationError::new(
            format!("{prefix}.quantity"),
            "quantity must not be negative",
        ));
    }

    if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
        errors.push(ValidationError::new(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
        ));
    }

    if !in_percent_range(item.discount) {
        errors.push(ValidationError::new(
            format!("{prefix}.discount"),
            format!("discount must be between 0 and 100 percent, got: {}", item.discount),
        ));
    }

    if item.vat_rate.is_sign_negative() && !item.vat_rate.is_zero() {
        errors.push(ValidationError::new(
            format!("{prefix}.vat_rate"),
            "VAT rate must not be negative",
        ));
    }
}

fn in_percent_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= dec!(100)
}
