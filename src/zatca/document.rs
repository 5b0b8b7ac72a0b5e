use serde::Serialize;

use super::hash::{digital_signature, zatca_hash};
use super::qr::QrPayload;
use crate::core::*;

/// Snapshot of an issued invoice with its QR data, hash and signature.
///
/// Built by [`assemble`]; later edits to the source invoice do not change
/// an existing document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub status: InvoiceStatus,
    pub currency: String,
    pub payment_terms: Option<String>,
    pub issue: IssueStamp,
    pub seller: SellerProfile,
    pub buyer: Buyer,
    pub items: Vec<LineItem>,
    pub totals: Totals,
    pub qr_payload: QrPayload,
    /// Encoded QR value (see [`QrPayload::encode`]).
    pub qr_code: String,
    pub zatca_hash: String,
    pub digital_signature: String,
}

impl InvoiceDocument {
    /// Hijri issue date in the requested language.
    pub fn hijri_issue_date(&self, locale: HijriLocale) -> String {
        self.issue.date_hijri.format(locale)
    }
}

/// Assemble the printable document for an issued, valid invoice.
pub fn assemble(invoice: &Invoice, seller: &SellerProfile) -> Result<InvoiceDocument, FawtaraError> {
    assemble_with(invoice, seller, &InvoiceDefaults::default())
}

/// [`assemble`], validating with the given defaults.
pub fn assemble_with(
    invoice: &Invoice,
    seller: &SellerProfile,
    defaults: &InvoiceDefaults,
) -> Result<InvoiceDocument, FawtaraError> {
    if invoice.seller_id != seller.id {
        return Err(FawtaraError::Assembly(format!(
            "invoice {} belongs to seller '{}', not '{}'",
            invoice.number, invoice.seller_id, seller.id
        )));
    }

    ensure_valid_with(invoice, seller, defaults.seller_vat_length)?;

    let issue = invoice.issue.clone().ok_or_else(|| {
        FawtaraError::Assembly(format!(
            "invoice {} has not been issued (status {})",
            invoice.number,
            invoice.status.as_str()
        ))
    })?;

    let timestamp = issue.timestamp();
    let totals = invoice.totals;

    let qr_payload = QrPayload {
        seller_name: seller.company_name_en.clone(),
        vat_number: seller.vat_number.clone(),
        invoice_number: invoice.number.clone(),
        timestamp,
        item_count: invoice.items.len(),
        total: totals.subtotal_including_vat,
        vat_amount: totals.total_vat_amount,
    };
    let qr_code = qr_payload.encode()?;

    let hash = zatca_hash(
        &invoice.number,
        totals.subtotal_including_vat,
        timestamp,
        &seller.vat_number,
    );
    let signature = digital_signature(
        &invoice.number,
        totals.subtotal_including_vat,
        timestamp,
        &seller.cr_number,
    );

    tracing::debug!(invoice = %invoice.number, "invoice document assembled");

    Ok(InvoiceDocument {
        invoice_number: invoice.number.clone(),
        invoice_type: invoice.invoice_type,
        status: invoice.status,
        currency: invoice.currency.clone(),
        payment_terms: invoice.payment_terms.clone(),
        issue,
        seller: seller.clone(),
        buyer: invoice.buyer.clone(),
        items: invoice.items.clone(),
        totals,
        qr_payload,
        qr_code,
        zatca_hash: hash,
        digital_signature: signature,
    })
}
