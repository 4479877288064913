//! EAN-13 check digit computation and validation.
//!
//! Pure, synchronous, allocation-free on the validation path. Safe to call
//! from any number of threads without coordination.

pub mod ean13;

pub use ean13::{check_digit, validate, Ean13, EanError, EAN13_LEN};
