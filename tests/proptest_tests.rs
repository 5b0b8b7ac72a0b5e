//! Property-based tests for the calculator, aggregator and draft protocol.
//!
//! Run with: `cargo test --test proptest_tests`

use chrono::NaiveDate;
use fawtara::core::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Generate a price (0.00 to 99999.99), zero included.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(|cents| Decimal::new(cents as i64, 2))
}

/// Generate a quantity (0 to 1000, up to 3 decimals).
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (0u32..=1_000_000u32).prop_map(|milli| Decimal::new(i64::from(milli), 3))
}

/// Generate a discount percentage, including out-of-range values.
fn arb_discount() -> impl Strategy<Value = Decimal> {
    (-500i64..=15_000i64).prop_map(|bp| Decimal::new(bp, 2))
}

fn arb_vat_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        Just(Decimal::new(5, 0)),
        Just(Decimal::new(15, 0)),
    ]
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (arb_quantity(), arb_price(), arb_discount(), arb_vat_rate()).prop_map(
        |(qty, price, discount, vat)| {
            LineItemBuilder::new("Item", qty, price)
                .discount(discount)
                .vat_rate(vat)
                .build()
        },
    )
}

fn arb_items() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(arb_item(), 0..=8)
}

fn arb_status() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Draft),
        Just(InvoiceStatus::Issued),
        Just(InvoiceStatus::Sent),
        Just(InvoiceStatus::Paid),
        Just(InvoiceStatus::Overdue),
        Just(InvoiceStatus::Cancelled),
    ]
}

fn build(items: Vec<LineItem>) -> Invoice {
    let mut builder = InvoiceBuilder::new("INV-PROP")
        .seller_id("co-1")
        .buyer(BuyerBuilder::b2c("Customer").build());
    for item in items {
        builder = builder.add_item(item);
    }
    builder.build().unwrap()
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// recompute() returns identical output for identical input.
    #[test]
    fn recompute_is_deterministic(item in arb_item()) {
        prop_assert_eq!(recompute(&item).unwrap(), recompute(&item).unwrap());
    }

    /// Item amounts follow the documented formula.
    #[test]
    fn item_amounts_follow_formula(item in arb_item()) {
        let subtotal = item.quantity * item.unit_price;
        let net = subtotal - subtotal * (item.discount / Decimal::ONE_HUNDRED);
        prop_assert_eq!(item.total_excluding_vat(), net);
        prop_assert_eq!(
            item.total_including_vat(),
            item.total_excluding_vat() + item.vat_amount()
        );
    }

    /// Totals are the sums of item amounts, and gross = net + VAT.
    #[test]
    fn aggregation_is_consistent(items in arb_items()) {
        let totals = recalc_totals(&items).unwrap();
        let net: Decimal = items.iter().map(|i| i.total_excluding_vat()).sum();
        let vat: Decimal = items.iter().map(|i| i.vat_amount()).sum();
        prop_assert_eq!(totals.subtotal_excluding_vat, net);
        prop_assert_eq!(totals.total_vat_amount, vat);
        prop_assert_eq!(
            totals.subtotal_including_vat,
            totals.subtotal_excluding_vat + totals.total_vat_amount
        );
    }

    /// Recomputing a consistent invoice changes nothing.
    #[test]
    fn recompute_is_idempotent(items in arb_items()) {
        let inv = build(items);
        let mut again = inv.clone();
        calculate_totals(&mut again).unwrap();
        prop_assert_eq!(&again, &inv);
        prop_assert!(validate_arithmetic(&inv).is_empty());
    }

    /// Removing an item lowers the totals by exactly that item's amounts.
    #[test]
    fn removal_subtracts_contribution(items in prop::collection::vec(arb_item(), 2..=8), pick in any::<prop::sample::Index>()) {
        let mut draft = InvoiceDraft::create(build(items)).unwrap();
        let before = draft.totals();
        let index = pick.index(draft.items().len());

        let removed = draft.remove_item(index).unwrap();
        let after = draft.totals();

        prop_assert_eq!(after.subtotal_excluding_vat, before.subtotal_excluding_vat - removed.total_excluding_vat());
        prop_assert_eq!(after.total_vat_amount, before.total_vat_amount - removed.vat_amount());
        prop_assert!(validate_arithmetic(draft.invoice()).is_empty());
    }

    /// The issue stamp is present exactly when the status is Issued.
    #[test]
    fn issue_stamp_tracks_status(statuses in prop::collection::vec(arb_status(), 1..12), day in 0i64..20_000) {
        let base = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(day);
        let now = base.and_hms_opt(10, 0, 0).unwrap();
        let mut draft = InvoiceDraft::create(build(Vec::new())).unwrap();

        for status in statuses {
            draft.set_status(status, now).unwrap();
            let inv = draft.invoice();
            prop_assert_eq!(inv.issue.is_some(), status == InvoiceStatus::Issued);
        }
    }
}
