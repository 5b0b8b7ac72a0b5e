use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::error::FawtaraError;
use super::types::*;

/// Recompute the derived amounts of a line item.
///
/// ```text
/// subtotal            = quantity * unit_price
/// total_excluding_vat = subtotal - subtotal * discount / 100
/// vat_amount          = total_excluding_vat * vat_rate / 100
/// total_including_vat = total_excluding_vat + vat_amount
/// ```
///
/// Inputs are not range-checked here. A discount above 100 or a negative
/// quantity yields negative amounts, which submission validation rejects.
/// Amounts beyond the `Decimal` range return [`FawtaraError::Arithmetic`].
pub fn recompute(item: &LineItem) -> Result<LineItem, FawtaraError> {
    let mut out = item.clone();
    apply_recompute(&mut out)?;
    Ok(out)
}

/// In-place form of [`recompute`]. The item is untouched on error.
pub(crate) fn apply_recompute(item: &mut LineItem) -> Result<(), FawtaraError> {
    let subtotal = in_range(item.quantity.checked_mul(item.unit_price), "line subtotal")?;
    let discount_amount = in_range(
        item.discount
            .checked_div(dec!(100))
            .and_then(|rate| subtotal.checked_mul(rate)),
        "discount amount",
    )?;
    let total_excluding_vat = in_range(
        subtotal.checked_sub(discount_amount),
        "total excluding VAT",
    )?;
    let vat_amount = in_range(
        item.vat_rate
            .checked_div(dec!(100))
            .and_then(|rate| total_excluding_vat.checked_mul(rate)),
        "VAT amount",
    )?;
    let total_including_vat = in_range(
        total_excluding_vat.checked_add(vat_amount),
        "total including VAT",
    )?;

    item.total_excluding_vat = total_excluding_vat;
    item.vat_amount = vat_amount;
    item.total_including_vat = total_including_vat;
    Ok(())
}

/// Sum the derived item amounts into invoice totals.
///
/// Reads the cached item fields as-is. An empty slice yields zeros.
pub fn recalc_totals(items: &[LineItem]) -> Result<Totals, FawtaraError> {
    sum_totals(items)
}

pub(crate) fn sum_totals<'a>(
    items: impl IntoIterator<Item = &'a LineItem>,
) -> Result<Totals, FawtaraError> {
    let mut subtotal_excluding_vat = Decimal::ZERO;
    let mut total_vat_amount = Decimal::ZERO;
    for item in items {
        subtotal_excluding_vat = in_range(
            subtotal_excluding_vat.checked_add(item.total_excluding_vat),
            "subtotal excluding VAT",
        )?;
        total_vat_amount = in_range(
            total_vat_amount.checked_add(item.vat_amount),
            "total VAT amount",
        )?;
    }

    Ok(Totals {
        subtotal_excluding_vat,
        total_vat_amount,
        subtotal_including_vat: in_range(
            subtotal_excluding_vat.checked_add(total_vat_amount),
            "subtotal including VAT",
        )?,
    })
}

/// Recompute every line item, then the invoice totals. The invoice is
/// left unchanged if any amount overflows.
pub fn calculate_totals(invoice: &mut Invoice) -> Result<(), FawtaraError> {
    let items = invoice
        .items
        .iter()
        .map(recompute)
        .collect::<Result<Vec<_>, _>>()?;
    invoice.totals = recalc_totals(&items)?;
    invoice.items = items;
    Ok(())
}

fn in_range(value: Option<Decimal>, what: &str) -> Result<Decimal, FawtaraError> {
    value.ok_or_else(|| FawtaraError::Arithmetic(format!("{what} exceeds the decimal range")))
}

/// Round to 2 decimal places using half-up (commercial rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, always with exactly 2 decimals.
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}
