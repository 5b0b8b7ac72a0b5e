//! ZATCA document assembly: QR payloads, invoice hash and signature tokens.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use fawtara::core::*;
//! use fawtara::zatca::assemble;
//! use rust_decimal_macros::dec;
//!
//! let seller = SellerProfileBuilder::new("co-1", "Binaa Contracting", "300000000000003", "1010010000")
//!     .build();
//! let invoice = InvoiceBuilder::new("INV-2024-001")
//!     .seller_id("co-1")
//!     .buyer(BuyerBuilder::b2c("Walk-in customer").build())
//!     .add_item(LineItemBuilder::new("Site survey", dec!(1), dec!(500)).build())
//!     .build()
//!     .unwrap();
//!
//! let mut draft = InvoiceDraft::create(invoice).unwrap();
//! let now = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! draft.set_status(InvoiceStatus::Issued, now).unwrap();
//!
//! let doc = assemble(draft.invoice(), &seller).unwrap();
//! assert_eq!(doc.qr_payload.total, dec!(575));
//! assert_eq!(doc.zatca_hash.len(), 64);
//! ```

mod document;
mod hash;
mod qr;

pub use document::{InvoiceDocument, assemble, assemble_with};
pub use hash::{HASH_LEN, SIGNATURE_LEN, digital_signature, zatca_hash};
pub use qr::{QrPayload, TlvFields, generate_qr_code_data};
