//! Spreadsheet-friendly exports of invoice data.
//!
//! # Example
//!
//! ```
//! use fawtara::core::*;
//! use fawtara::export::invoice_summary_csv;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV-1")
//!     .seller_id("co-1")
//!     .buyer(BuyerBuilder::b2c("Customer").build())
//!     .add_item(LineItemBuilder::new("Survey", dec!(1), dec!(100)).build())
//!     .build()
//!     .unwrap();
//!
//! let csv = invoice_summary_csv(&[invoice]);
//! assert!(csv.lines().nth(1).unwrap().ends_with("\"Customer\",\"\",1,100.00,15.00,115.00,\"SAR\""));
//! ```

mod csv_export;

pub use csv_export::{invoice_summary_csv, line_items_csv};
