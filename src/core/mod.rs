//! Core invoice types, line-item math, validation and the edit protocol.
//!
//! This module holds everything needed to compose an invoice and keep its
//! derived amounts consistent: the data model, the line-item calculator,
//! the invoice aggregator, the draft mutation protocol, Hijri dates and
//! the submission guard.

mod builder;
mod calc;
mod config;
mod draft;
mod error;
pub mod hijri;
mod submission;
mod types;
mod validation;

pub use builder::*;
pub use calc::*;
pub use config::*;
pub use draft::*;
pub use error::*;
pub use hijri::{HijriCalendar, HijriDate, HijriLocale, TabularHijri, convert_to_hijri};
pub use submission::*;
pub use types::*;
pub use validation::*;
