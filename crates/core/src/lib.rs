//! Formgate core library.
//!
//! Pure logic shared by the HTTP layer: the validation engine and
//! anti-forgery token signing. Nothing in here performs I/O.

pub mod csrf;
pub mod error;
pub mod validation;
