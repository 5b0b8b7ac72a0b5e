//! CSV invoice summaries.
//!
//! Comma separated, every text field quoted, amounts with 2 decimals and a
//! dot decimal separator, CRLF line endings. Amounts come from the cached
//! invoice fields; nothing is recomputed here.

use rust_decimal::Decimal;

use crate::core::{Invoice, format_money};

const SUMMARY_HEADER: [&str; 12] = [
    "Invoice Number",
    "Type",
    "Status",
    "Issue Date",
    "Issue Date (Hijri)",
    "Buyer",
    "Buyer VAT",
    "Items",
    "Subtotal Excl. VAT",
    "VAT",
    "Total Incl. VAT",
    "Currency",
];

const ITEMS_HEADER: [&str; 10] = [
    "Description",
    "Description (Arabic)",
    "Category",
    "Quantity",
    "Unit Price",
    "Discount %",
    "VAT %",
    "Total Excl. VAT",
    "VAT",
    "Total Incl. VAT",
];

/// One row per invoice.
pub fn invoice_summary_csv(invoices: &[Invoice]) -> String {
    let mut out = String::new();
    header(&mut out, &SUMMARY_HEADER);

    for inv in invoices {
        let issue = inv.issue.as_ref();

        csv_field_str(&mut out, &inv.number);
        out.push(',');
        csv_field_str(&mut out, inv.invoice_type.as_str());
        out.push(',');
        csv_field_str(&mut out, inv.status.as_str());
        out.push(',');
        if let Some(stamp) = issue {
            out.push_str(&stamp.date_gregorian.format("%Y-%m-%d").to_string());
        }
        out.push(',');
        if let Some(stamp) = issue {
            out.push_str(&stamp.date_hijri.to_string());
        }
        out.push(',');
        csv_field_str(&mut out, &inv.buyer.name_en);
        out.push(',');
        csv_field_str(&mut out, inv.buyer.vat_number.as_deref().unwrap_or(""));
        out.push(',');
        out.push_str(&inv.items.len().to_string());
        out.push(',');
        csv_field_decimal(&mut out, inv.totals.subtotal_excluding_vat);
        out.push(',');
        csv_field_decimal(&mut out, inv.totals.total_vat_amount);
        out.push(',');
        csv_field_decimal(&mut out, inv.totals.subtotal_including_vat);
        out.push(',');
        csv_field_str(&mut out, &inv.currency);
        out.push_str("\r\n");
    }
    out
}

/// One row per line item of a single invoice.
pub fn line_items_csv(invoice: &Invoice) -> String {
    let mut out = String::new();
    header(&mut out, &ITEMS_HEADER);

    for item in &invoice.items {
        csv_field_str(&mut out, &item.description_en);
        out.push(',');
        csv_field_str(&mut out, &item.description_ar);
        out.push(',');
        csv_field_str(&mut out, &format!("{:?}", item.category));
        out.push(',');
        out.push_str(&item.quantity.normalize().to_string());
        out.push(',');
        csv_field_decimal(&mut out, item.unit_price);
        out.push(',');
        out.push_str(&item.discount.normalize().to_string());
        out.push(',');
        out.push_str(&item.vat_rate.normalize().to_string());
        out.push(',');
        csv_field_decimal(&mut out, item.total_excluding_vat());
        out.push(',');
        csv_field_decimal(&mut out, item.vat_amount());
        out.push(',');
        csv_field_decimal(&mut out, item.total_including_vat());
        out.push_str("\r\n");
    }
    out
}

fn header(out: &mut String, columns: &[&str]) {
    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        csv_field_str(out, col);
    }
    out.push_str("\r\n");
}

fn csv_field_str(out: &mut String, value: &str) {
    out.push('"');
    // Escape internal double quotes
    for ch in value.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

fn csv_field_decimal(out: &mut String, d: Decimal) {
    out.push_str(&format_money(d));
}
