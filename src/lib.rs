//! # fawtara
//!
//! Saudi e-invoice engine: per-line VAT and discount math, invoice totals,
//! an edit protocol that keeps both consistent, Hijri issue dates, and
//! ZATCA-style QR payloads with deterministic hash tokens.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use fawtara::core::*;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-2024-001")
//!     .seller_id("co-1")
//!     .buyer(BuyerBuilder::b2b("Al Noor Trading").vat_number("310000000000003").build())
//!     .add_item(LineItemBuilder::new("Concrete works", dec!(2), dec!(100))
//!         .discount(dec!(10))
//!         .build())
//!     .build()
//!     .unwrap();
//!
//! let mut draft = InvoiceDraft::create(invoice).unwrap();
//! draft
//!     .add_item(LineItemBuilder::new("Inspection", dec!(1), dec!(50)).build())
//!     .unwrap();
//!
//! let totals = draft.totals();
//! assert_eq!(totals.subtotal_excluding_vat, dec!(230));
//! assert_eq!(totals.total_vat_amount, dec!(34.5));
//! assert_eq!(totals.subtotal_including_vat, dec!(264.5));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, line-item math, validation, drafts, Hijri dates, submission |
//! | `zatca` (default) | Document assembly, QR payloads, hash and signature tokens |
//! | `export` | CSV invoice summaries |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "zatca")]
pub mod zatca;

#[cfg(feature = "export")]
pub mod export;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
