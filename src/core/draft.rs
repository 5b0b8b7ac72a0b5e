use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::calc::{apply_recompute, calculate_totals, sum_totals};
use super::config::InvoiceDefaults;
use super::error::{FawtaraError, ValidationError};
use super::hijri::{HijriCalendar, TabularHijri};
use super::types::*;
use super::validation::{VAT_NUMBER_LEN, validate_invoice_with};

/// Which flow a draft was opened from. Both share the same protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    Edit,
}

/// Composition phase of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionPhase {
    /// No line items yet.
    Empty,
    /// Draft with items that does not pass validation.
    Editing,
    /// Draft that passes validation and can be submitted.
    Valid,
    Issued,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

/// Single-field edit of a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemEdit {
    DescriptionEn(String),
    DescriptionAr(String),
    Category(ItemCategory),
    Quantity(Decimal),
    UnitPrice(Decimal),
    Discount(Decimal),
    VatRate(Decimal),
}

/// An invoice being composed or edited.
///
/// Every item mutation runs the same sequence: apply the edit, recompute
/// the row, recompute the invoice totals. The sequence completes before
/// the method returns, so callers never observe stale totals. A mutation
/// whose amounts overflow is rejected and leaves the draft as it was.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    invoice: Invoice,
    mode: DraftMode,
    needs_revalidation: bool,
    seller_vat_length: usize,
}

impl InvoiceDraft {
    /// Start composing a new invoice.
    pub fn create(invoice: Invoice) -> Result<Self, FawtaraError> {
        Self::open(invoice, DraftMode::Create)
    }

    /// Open an existing invoice for editing. Derived amounts are
    /// recomputed on entry rather than trusted from storage.
    pub fn edit(invoice: Invoice) -> Result<Self, FawtaraError> {
        Self::open(invoice, DraftMode::Edit)
    }

    fn open(mut invoice: Invoice, mode: DraftMode) -> Result<Self, FawtaraError> {
        calculate_totals(&mut invoice)?;
        Ok(Self {
            invoice,
            mode,
            needs_revalidation: false,
            seller_vat_length: VAT_NUMBER_LEN,
        })
    }

    /// Validate with the configured seller VAT length.
    pub fn with_defaults(mut self, defaults: &InvoiceDefaults) -> Self {
        self.seller_vat_length = defaults.seller_vat_length;
        self
    }

    /// Seller VAT length used by [`validate`](Self::validate) and
    /// [`phase`](Self::phase).
    pub fn seller_vat_length(&self) -> usize {
        self.seller_vat_length
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    pub fn into_invoice(self) -> Invoice {
        self.invoice
    }

    pub fn mode(&self) -> DraftMode {
        self.mode
    }

    pub fn items(&self) -> &[LineItem] {
        &self.invoice.items
    }

    pub fn totals(&self) -> Totals {
        self.invoice.totals
    }

    /// True after an item was changed on a non-draft invoice and the
    /// invoice has not been validated since.
    pub fn needs_revalidation(&self) -> bool {
        self.needs_revalidation
    }

    /// Append a line item. Returns its index.
    pub fn add_item(&mut self, mut item: LineItem) -> Result<usize, FawtaraError> {
        apply_recompute(&mut item)?;
        let totals = sum_totals(self.invoice.items.iter().chain([&item]))?;

        self.invoice.items.push(item);
        self.commit_totals(totals);
        Ok(self.invoice.items.len() - 1)
    }

    /// Apply a single-field edit to the item at `index`.
    pub fn update_item(
        &mut self,
        index: usize,
        edit: LineItemEdit,
    ) -> Result<&LineItem, FawtaraError> {
        let current = self.invoice.items.get(index).ok_or_else(|| {
            FawtaraError::Edit(format!(
                "no line item at index {index} (invoice has {})",
                self.invoice.items.len()
            ))
        })?;

        let mut updated = current.clone();
        match edit {
            LineItemEdit::DescriptionEn(text) => updated.description_en = text,
            LineItemEdit::DescriptionAr(text) => updated.description_ar = text,
            LineItemEdit::Category(category) => updated.category = category,
            LineItemEdit::Quantity(value) => updated.quantity = value,
            LineItemEdit::UnitPrice(value) => updated.unit_price = value,
            LineItemEdit::Discount(value) => updated.discount = value,
            LineItemEdit::VatRate(value) => updated.vat_rate = value,
        }
        apply_recompute(&mut updated)?;
        let totals = sum_totals(
            self.invoice
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| if i == index { &updated } else { item }),
        )?;
        tracing::trace!(invoice = %self.invoice.number, index, "line item recomputed");

        self.invoice.items[index] = updated;
        self.commit_totals(totals);
        Ok(&self.invoice.items[index])
    }

    /// Remove the item at `index`. The only remaining item cannot be
    /// removed; an invoice needs at least one row.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, FawtaraError> {
        if index >= self.invoice.items.len() {
            return Err(FawtaraError::Edit(format!(
                "no line item at index {index} (invoice has {})",
                self.invoice.items.len()
            )));
        }
        if self.invoice.items.len() == 1 {
            return Err(FawtaraError::Edit(
                "cannot remove the only line item".into(),
            ));
        }

        let totals = sum_totals(
            self.invoice
                .items
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, item)| item),
        )?;

        let removed = self.invoice.items.remove(index);
        self.commit_totals(totals);
        Ok(removed)
    }

    /// Replace the buyer with a copy of the given party.
    pub fn set_buyer(&mut self, buyer: Buyer) {
        self.invoice.buyer = buyer;
    }

    pub fn set_payment_terms(&mut self, terms: Option<String>) {
        self.invoice.payment_terms = terms;
    }

    /// Change status, stamping or clearing the issue date/time.
    pub fn set_status(
        &mut self,
        status: InvoiceStatus,
        now: NaiveDateTime,
    ) -> Result<(), FawtaraError> {
        self.set_status_with(status, now, &TabularHijri)
    }

    /// [`set_status`](Self::set_status) with a caller-supplied Hijri calendar.
    ///
    /// Moving to `Issued` stamps Gregorian date, time and Hijri date
    /// together. Re-setting `Issued` keeps the existing stamp. Any other
    /// status clears all three.
    pub fn set_status_with(
        &mut self,
        status: InvoiceStatus,
        now: NaiveDateTime,
        calendar: &dyn HijriCalendar,
    ) -> Result<(), FawtaraError> {
        let previous = self.invoice.status;

        if status == InvoiceStatus::Issued {
            if previous != InvoiceStatus::Issued || self.invoice.issue.is_none() {
                let date = now.date();
                let hijri = calendar.to_hijri(date).ok_or_else(|| {
                    FawtaraError::Calendar(format!("{date} has no Hijri equivalent"))
                })?;
                self.invoice.issue = Some(IssueStamp {
                    date_gregorian: date,
                    time_gregorian: now.time(),
                    date_hijri: hijri,
                });
                tracing::debug!(invoice = %self.invoice.number, hijri = %hijri, "issue date stamped");
            }
        } else {
            self.invoice.issue = None;
        }

        self.invoice.status = status;
        if previous != status {
            tracing::debug!(
                invoice = %self.invoice.number,
                from = previous.as_str(),
                to = status.as_str(),
                "status changed"
            );
        }
        Ok(())
    }

    /// Validate against the seller profile. Clears the revalidation flag
    /// when the invoice passes.
    pub fn validate(&mut self, seller: &SellerProfile) -> Vec<ValidationError> {
        let errors = validate_invoice_with(&self.invoice, seller, self.seller_vat_length);
        if errors.is_empty() {
            self.needs_revalidation = false;
        }
        errors
    }

    pub fn phase(&self, seller: &SellerProfile) -> CompositionPhase {
        match self.invoice.status {
            InvoiceStatus::Draft => {
                if self.invoice.items.is_empty() {
                    CompositionPhase::Empty
                } else if validate_invoice_with(&self.invoice, seller, self.seller_vat_length)
                    .is_empty()
                {
                    CompositionPhase::Valid
                } else {
                    CompositionPhase::Editing
                }
            }
            InvoiceStatus::Issued => CompositionPhase::Issued,
            InvoiceStatus::Sent => CompositionPhase::Sent,
            InvoiceStatus::Paid => CompositionPhase::Paid,
            InvoiceStatus::Overdue => CompositionPhase::Overdue,
            InvoiceStatus::Cancelled => CompositionPhase::Cancelled,
        }
    }

    fn commit_totals(&mut self, totals: Totals) {
        self.invoice.totals = totals;
        if !self.invoice.status.permits_item_edits() {
            self.needs_revalidation = true;
        }
    }
}
