use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::draft::{DraftMode, InvoiceDraft};
use super::error::{ValidationError, join_errors};
use super::types::*;
use super::validation::validate_invoice_with;

/// Create/update body sent to the invoice backend.
///
/// Amounts are copied from the invoice's cached totals, never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub invoice_number: String,
    pub invoice_type: InvoiceType,
    pub currency: String,
    pub issue_date_gregorian: Option<String>,
    pub issue_time_gregorian: Option<String>,
    pub issue_date_hijri: Option<String>,
    pub status: InvoiceStatus,
    pub payment_terms: Option<String>,
    pub subtotal_excluding_vat: Decimal,
    pub total_vat_amount: Decimal,
    pub subtotal_including_vat: Decimal,
    pub items: Vec<LineItem>,
    pub buyer: Buyer,
    pub seller: String,
}

impl SubmissionPayload {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let issue = invoice.issue.as_ref();
        Self {
            invoice_number: invoice.number.clone(),
            invoice_type: invoice.invoice_type,
            currency: invoice.currency.clone(),
            issue_date_gregorian: issue.map(|s| s.date_gregorian.format("%Y-%m-%d").to_string()),
            issue_time_gregorian: issue.map(|s| s.time_gregorian.format("%H:%M:%S").to_string()),
            issue_date_hijri: issue.map(|s| s.date_hijri.to_string()),
            status: invoice.status,
            payment_terms: invoice.payment_terms.clone(),
            subtotal_excluding_vat: invoice.totals.subtotal_excluding_vat,
            total_vat_amount: invoice.totals.total_vat_amount,
            subtotal_including_vat: invoice.totals.subtotal_including_vat,
            items: invoice.items.clone(),
            buyer: invoice.buyer.clone(),
            seller: invoice.seller_id.clone(),
        }
    }

    /// JSON body for the REST call.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Invoice REST service. Implemented outside this crate.
pub trait InvoiceBackend {
    type Error: std::error::Error + 'static;

    fn create_invoice(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    fn update_invoice(
        &self,
        invoice_number: &str,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), Self::Error>>;
}

/// Errors from [`SubmissionGuard::submit`].
#[derive(Debug, Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
    /// Local validation failed; nothing was sent.
    #[error("validation failed: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// A previous submission has not settled yet.
    #[error("a submission is already in flight")]
    InFlight,

    /// The backend rejected the request. The draft is unchanged.
    #[error("backend error: {0}")]
    Backend(#[source] E),
}

/// Refuses a second submission while one is outstanding.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: AtomicBool,
}

/// Releases the guard when dropped, including on error or cancellation.
struct InFlightTicket<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn acquire(&self) -> Option<InFlightTicket<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightTicket {
                flag: &self.in_flight,
            })
    }

    /// Validate and send a draft. Create-mode drafts are created, edit-mode
    /// drafts updated. The draft is only borrowed, so it survives a failed
    /// submission for retry.
    pub async fn submit<B: InvoiceBackend>(
        &self,
        backend: &B,
        draft: &InvoiceDraft,
        seller: &SellerProfile,
    ) -> Result<(), SubmitError<B::Error>> {
        let invoice = draft.invoice();

        let errors = validate_invoice_with(invoice, seller, draft.seller_vat_length());
        if !errors.is_empty() {
            tracing::debug!(invoice = %invoice.number, count = errors.len(), "submission blocked by validation");
            return Err(SubmitError::Invalid(errors));
        }

        let Some(_ticket) = self.acquire() else {
            tracing::warn!(invoice = %invoice.number, "submission refused: previous request still in flight");
            return Err(SubmitError::InFlight);
        };

        let payload = SubmissionPayload::from_invoice(invoice);
        let result = match draft.mode() {
            DraftMode::Create => backend.create_invoice(&payload).await,
            DraftMode::Edit => backend.update_invoice(&invoice.number, &payload).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(invoice = %invoice.number, mode = ?draft.mode(), "invoice submitted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(invoice = %invoice.number, error = %e, "invoice submission failed");
                Err(SubmitError::Backend(e))
            }
        }
    }
}
