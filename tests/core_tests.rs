use fawtara::core::*;
use rust_decimal_macros::dec;

fn buyer() -> Buyer {
    BuyerBuilder::b2b("Al Noor Trading")
        .name_ar("شركة النور للتجارة")
        .vat_number("310000000000003")
        .address(
            AddressBuilder::new("SA")
                .line_en("King Fahd Road")
                .city("Riyadh")
                .postal_code("12211")
                .build(),
        )
        .build()
}

fn concrete_works() -> LineItem {
    LineItemBuilder::new("Concrete works", dec!(2), dec!(100))
        .description_ar("أعمال خرسانية")
        .discount(dec!(10))
        .vat_rate(dec!(15))
        .build()
}

fn inspection() -> LineItem {
    LineItemBuilder::new("Inspection", dec!(1), dec!(50))
        .vat_rate(dec!(15))
        .build()
}

// --- Line-item calculator ---

#[test]
fn single_discounted_item() {
    let item = concrete_works();
    assert_eq!(item.total_excluding_vat(), dec!(180));
    assert_eq!(item.vat_amount(), dec!(27));
    assert_eq!(item.total_including_vat(), dec!(207));
}

#[test]
fn recompute_is_pure() {
    let item = concrete_works();
    let a = recompute(&item).unwrap();
    let b = recompute(&item).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, item);
}

#[test]
fn default_vat_rate_is_fifteen() {
    let item = LineItemBuilder::new("Cement", dec!(10), dec!(20)).build();
    assert_eq!(item.vat_rate, dec!(15));
    assert_eq!(item.vat_amount(), dec!(30));
}

#[test]
fn zero_price_is_not_an_error() {
    let item = LineItemBuilder::new("Free sample", dec!(3), dec!(0)).build();
    assert!(item.total_including_vat().is_zero());
}

// --- Aggregator ---

#[test]
fn single_item_invoice_totals() {
    let inv = InvoiceBuilder::new("INV-2024-001")
        .seller_id("co-1")
        .buyer(buyer())
        .add_item(concrete_works())
        .build()
        .unwrap();

    assert_eq!(inv.totals.subtotal_excluding_vat, dec!(180));
    assert_eq!(inv.totals.total_vat_amount, dec!(27));
    assert_eq!(inv.totals.subtotal_including_vat, dec!(207));
}

#[test]
fn two_item_invoice_totals() {
    let inv = InvoiceBuilder::new("INV-2024-002")
        .seller_id("co-1")
        .buyer(buyer())
        .add_item(concrete_works())
        .add_item(inspection())
        .build()
        .unwrap();

    let second = &inv.items[1];
    assert_eq!(second.total_excluding_vat(), dec!(50));
    assert_eq!(second.vat_amount(), dec!(7.5));
    assert_eq!(second.total_including_vat(), dec!(57.5));

    assert_eq!(inv.totals.subtotal_excluding_vat, dec!(230));
    assert_eq!(inv.totals.total_vat_amount, dec!(34.5));
    assert_eq!(inv.totals.subtotal_including_vat, dec!(264.5));
}

#[test]
fn totals_do_not_depend_on_item_order() {
    let forward = recalc_totals(&[concrete_works(), inspection()]).unwrap();
    let reverse = recalc_totals(&[inspection(), concrete_works()]).unwrap();
    assert_eq!(forward, reverse);
}

#[test]
fn mixed_vat_rates() {
    let zero_rated = LineItemBuilder::new("Export crate", dec!(4), dec!(25))
        .category(ItemCategory::Product)
        .vat_rate(dec!(0))
        .build();
    let totals = recalc_totals(&[concrete_works(), zero_rated]).unwrap();
    assert_eq!(totals.subtotal_excluding_vat, dec!(280));
    assert_eq!(totals.total_vat_amount, dec!(27));
    assert_eq!(totals.subtotal_including_vat, dec!(307));
}

#[test]
fn fractional_amounts_are_kept_exact() {
    let item = LineItemBuilder::new("Rebar", dec!(3), dec!(33.33))
        .discount(dec!(12.5))
        .build();
    // 99.99 * 0.875 = 87.49125, VAT 13.1236875
    assert_eq!(item.total_excluding_vat(), dec!(87.49125));
    assert_eq!(item.vat_amount(), dec!(13.1236875));
    assert_eq!(format_money(item.total_including_vat()), "100.61");
}

// --- Builder ---

#[test]
fn builder_requires_buyer_and_seller() {
    let err = InvoiceBuilder::new("INV-1").seller_id("co-1").build().unwrap_err();
    assert!(matches!(err, FawtaraError::Builder(_)));

    let err = InvoiceBuilder::new("INV-1").buyer(buyer()).build().unwrap_err();
    assert!(err.to_string().contains("seller id"));
}

#[test]
fn builder_starts_as_draft_without_stamp() {
    let inv = InvoiceBuilder::new("INV-1")
        .seller_id("co-1")
        .buyer(buyer())
        .build()
        .unwrap();
    assert_eq!(inv.status, InvoiceStatus::Draft);
    assert!(inv.issue.is_none());
    assert!(inv.items.is_empty());
    assert_eq!(inv.totals, Totals::default());
}

#[test]
fn builder_uses_configured_defaults() {
    let defaults = InvoiceDefaults::from_json_str(
        r#"{ "vat_rate": "5", "invoice_type": "Simplified", "payment_terms": "Due on receipt" }"#,
    )
    .unwrap();

    let item = LineItemBuilder::with_defaults("Survey", dec!(1), dec!(100), &defaults).build();
    let inv = InvoiceBuilder::with_defaults("INV-9", &defaults)
        .seller_id("co-1")
        .buyer(buyer())
        .add_item(item)
        .build()
        .unwrap();

    assert_eq!(inv.invoice_type, InvoiceType::Simplified);
    assert_eq!(inv.currency, "SAR");
    assert_eq!(inv.payment_terms.as_deref(), Some("Due on receipt"));
    assert_eq!(inv.totals.total_vat_amount, dec!(5));
}

// --- Client copy ---

#[test]
fn buyer_from_client_with_vat_is_b2b() {
    let client: ClientRecord = serde_json::from_str(
        r#"{
            "client_name_eng": "Al Noor Trading",
            "client_name_arb": "شركة النور",
            "vat_number": " 310000000000003 ",
            "contact_person": "Fahad",
            "city": "Jeddah"
        }"#,
    )
    .unwrap();

    let b = Buyer::from_client(&client);
    assert_eq!(b.buyer_type, BuyerType::B2B);
    assert_eq!(b.vat_number.as_deref(), Some("310000000000003"));
    assert_eq!(b.address.city.as_deref(), Some("Jeddah"));
    assert_eq!(b.contact.person.as_deref(), Some("Fahad"));
}

#[test]
fn buyer_from_client_without_vat_is_b2c() {
    let client = ClientRecord {
        client_name_eng: "Walk-in".into(),
        vat_number: Some("   ".into()),
        ..Default::default()
    };
    let b = Buyer::from_client(&client);
    assert_eq!(b.buyer_type, BuyerType::B2C);
    assert!(b.vat_number.is_none());
}

#[test]
fn buyer_is_a_copy_not_a_link() {
    let mut client = ClientRecord {
        client_name_eng: "Original Name".into(),
        ..Default::default()
    };
    let b = Buyer::from_client(&client);
    client.client_name_eng = "Renamed".into();
    assert_eq!(b.name_en, "Original Name");
}

// --- Types ---

#[test]
fn invoice_type_codes() {
    assert_eq!(InvoiceType::Standard.code(), 388);
    assert_eq!(InvoiceType::Simplified.code(), 388);
    assert_eq!(InvoiceType::Credit.code(), 381);
    assert_eq!(InvoiceType::Debit.code(), 383);
}

#[test]
fn only_draft_permits_item_edits() {
    assert!(InvoiceStatus::Draft.permits_item_edits());
    for s in [
        InvoiceStatus::Issued,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ] {
        assert!(!s.permits_item_edits());
    }
}
