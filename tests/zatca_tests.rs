#![cfg(feature = "zatca")]

use chrono::{NaiveDate, NaiveDateTime};
use fawtara::core::*;
use fawtara::zatca::*;
use rust_decimal_macros::dec;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn seller() -> SellerProfile {
    SellerProfileBuilder::new("co-1", "Binaa Contracting", "300000000000003", "1010010000")
        .company_name_ar("بناء للمقاولات")
        .address("Olaya St, Riyadh", "شارع العليا، الرياض")
        .contact("+966 11 000 0000", "billing@binaa.sa")
        .bank("Saudi National Bank", "SA0380000000608010167519", "NCBKSAJE")
        .build()
}

fn issued_draft() -> InvoiceDraft {
    let invoice = InvoiceBuilder::new("INV-2024-030")
        .seller_id("co-1")
        .payment_terms("Net 30")
        .buyer(
            BuyerBuilder::b2b("Al Noor Trading")
                .vat_number("310000000000003")
                .build(),
        )
        .add_item(
            LineItemBuilder::new("Concrete works", dec!(2), dec!(100))
                .discount(dec!(10))
                .build(),
        )
        .add_item(LineItemBuilder::new("Inspection", dec!(1), dec!(50)).build())
        .build()
        .unwrap();

    let mut draft = InvoiceDraft::create(invoice).unwrap();
    draft
        .set_status(InvoiceStatus::Issued, at(2024, 3, 11, 9, 30))
        .unwrap();
    draft
}

#[test]
fn assemble_issued_invoice() {
    let draft = issued_draft();
    let doc = assemble(draft.invoice(), &seller()).unwrap();

    assert_eq!(doc.invoice_number, "INV-2024-030");
    assert_eq!(doc.totals.subtotal_including_vat, dec!(264.5));
    assert_eq!(doc.items.len(), 2);
    assert_eq!(doc.seller.iban.as_deref(), Some("SA0380000000608010167519"));
    assert_eq!(doc.buyer.name_en, "Al Noor Trading");

    let qr = QrPayload::decode(&doc.qr_code).unwrap();
    assert_eq!(qr, doc.qr_payload);
    assert_eq!(qr.seller_name, "Binaa Contracting");
    assert_eq!(qr.vat_number, "300000000000003");
    assert_eq!(qr.invoice_number, "INV-2024-030");
    assert_eq!(qr.timestamp, at(2024, 3, 11, 9, 30));
    assert_eq!(qr.item_count, 2);
    assert_eq!(qr.total, dec!(264.5));
    assert_eq!(qr.vat_amount, dec!(34.5));

    assert_eq!(doc.zatca_hash.len(), HASH_LEN);
    assert_eq!(doc.digital_signature.len(), SIGNATURE_LEN);
    assert_eq!(
        doc.zatca_hash,
        zatca_hash("INV-2024-030", dec!(264.5), at(2024, 3, 11, 9, 30), "300000000000003")
    );
    assert_eq!(
        doc.digital_signature,
        digital_signature("INV-2024-030", dec!(264.5), at(2024, 3, 11, 9, 30), "1010010000")
    );
}

#[test]
fn assembly_is_deterministic() {
    let draft = issued_draft();
    let a = assemble(draft.invoice(), &seller()).unwrap();
    let b = assemble(draft.invoice(), &seller()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tlv_form_carries_five_fields() {
    let doc = assemble(issued_draft().invoice(), &seller()).unwrap();
    let tlv = doc.qr_payload.to_tlv_base64().unwrap();
    let fields = TlvFields::decode(&tlv).unwrap();
    assert_eq!(
        fields,
        TlvFields {
            seller_name: "Binaa Contracting".into(),
            vat_number: "300000000000003".into(),
            timestamp: "2024-03-11T09:30:00".into(),
            total: "264.50".into(),
            vat_amount: "34.50".into(),
        }
    );
}

#[test]
fn hijri_issue_date_is_localized() {
    let doc = assemble(issued_draft().invoice(), &seller()).unwrap();
    assert_eq!(
        doc.hijri_issue_date(HijriLocale::English),
        "Monday, 1 Ramadan 1445 AH"
    );
    assert!(doc.hijri_issue_date(HijriLocale::Arabic).contains("رمضان"));
}

#[test]
fn draft_invoice_cannot_be_assembled() {
    let mut draft = issued_draft();
    draft
        .set_status(InvoiceStatus::Draft, at(2024, 3, 11, 10, 0))
        .unwrap();
    let err = assemble(draft.invoice(), &seller()).unwrap_err();
    assert!(matches!(err, FawtaraError::Assembly(_)));
}

#[test]
fn invalid_invoice_cannot_be_assembled() {
    let mut s = seller();
    s.vat_number = "12345".into();
    let err = assemble(issued_draft().invoice(), &s).unwrap_err();
    assert!(matches!(err, FawtaraError::Validation(_)));
}

#[test]
fn seller_must_match_invoice() {
    let mut s = seller();
    s.id = "co-2".into();
    let err = assemble(issued_draft().invoice(), &s).unwrap_err();
    assert!(matches!(err, FawtaraError::Assembly(_)));
}

#[test]
fn post_issue_edit_changes_hash() {
    let mut draft = issued_draft();
    let before = assemble(draft.invoice(), &seller()).unwrap();

    draft
        .update_item(1, LineItemEdit::Quantity(dec!(2)))
        .unwrap();
    assert!(draft.needs_revalidation());
    let after = assemble(draft.invoice(), &seller()).unwrap();

    assert_ne!(before.zatca_hash, after.zatca_hash);
    assert_ne!(before.qr_code, after.qr_code);
    // The earlier snapshot is unaffected.
    assert_eq!(before.totals.subtotal_including_vat, dec!(264.5));
}

#[test]
fn qr_helper_matches_payload_encoding() {
    let doc = assemble(issued_draft().invoice(), &seller()).unwrap();
    assert_eq!(generate_qr_code_data(&doc.qr_payload).unwrap(), doc.qr_code);
}

#[test]
fn garbage_qr_is_an_encoding_error() {
    assert!(matches!(
        QrPayload::decode("not base64 !!"),
        Err(FawtaraError::Encoding(_))
    ));
    assert!(matches!(
        TlvFields::decode("AQ=="),
        Err(FawtaraError::Encoding(_))
    ));
}

#[test]
fn assemble_with_configured_vat_length() {
    let mut s = seller();
    s.vat_number = "1234567890".into();
    let defaults = InvoiceDefaults {
        seller_vat_length: 10,
        ..InvoiceDefaults::default()
    };
    let draft = issued_draft();

    assert!(matches!(
        assemble(draft.invoice(), &s),
        Err(FawtaraError::Validation(_))
    ));
    let doc = assemble_with(draft.invoice(), &s, &defaults).unwrap();
    assert_eq!(doc.qr_payload.vat_number, "1234567890");
}

#[test]
fn hash_fields_cannot_be_shifted() {
    let t = at(2024, 3, 11, 9, 0);
    assert_ne!(
        digital_signature("X", dec!(1), t, "Y|1.00|2024-03-11T09:00:00|Z"),
        digital_signature("X|1.00|2024-03-11T09:00:00|Y", dec!(1), t, "Z")
    );
}
