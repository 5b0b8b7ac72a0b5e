//! Compose, issue and assemble a B2B invoice.
//!
//! Run with: `cargo run --example basic_invoice`

use chrono::Local;
use fawtara::core::*;
use fawtara::zatca::assemble;
use rust_decimal_macros::dec;

fn main() -> Result<(), FawtaraError> {
    let seller = SellerProfileBuilder::new(
        "co-1",
        "Binaa Contracting",
        "300000000000003",
        "1010010000",
    )
    .company_name_ar("بناء للمقاولات")
    .address("Olaya St, Riyadh", "شارع العليا، الرياض")
    .build();

    let invoice = InvoiceBuilder::new("INV-2024-001")
        .seller_id(&seller.id)
        .payment_terms("Net 30")
        .buyer(
            BuyerBuilder::b2b("Al Noor Trading")
                .name_ar("النور للتجارة")
                .vat_number("310000000000003")
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Concrete works", dec!(2), dec!(100))
                .description_ar("أعمال خرسانية")
                .discount(dec!(10))
                .build(),
        )
        .build()?;

    let mut draft = InvoiceDraft::create(invoice)?;
    draft.add_item(
        LineItemBuilder::new("Site inspection", dec!(1), dec!(50))
            .category(ItemCategory::Service)
            .build(),
    )?;
    draft.update_item(0, LineItemEdit::Quantity(dec!(3)))?;

    let errors = draft.validate(&seller);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        return Ok(());
    }

    draft.set_status(InvoiceStatus::Issued, Local::now().naive_local())?;
    let doc = assemble(draft.invoice(), &seller)?;

    println!("Invoice {} ({})", doc.invoice_number, doc.status.as_str());
    println!("  Net:   {} SAR", format_money(doc.totals.subtotal_excluding_vat));
    println!("  VAT:   {} SAR", format_money(doc.totals.total_vat_amount));
    println!("  Total: {} SAR", format_money(doc.totals.subtotal_including_vat));
    println!("  Hijri: {}", doc.hijri_issue_date(HijriLocale::English));
    println!("         {}", doc.hijri_issue_date(HijriLocale::Arabic));
    println!("  Hash:  {}", doc.zatca_hash);
    println!("  QR:    {}", doc.qr_code);
    Ok(())
}
