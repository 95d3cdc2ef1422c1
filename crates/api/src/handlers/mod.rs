//! Request handlers.
//!
//! `form` serves the server-rendered login form; `validation` exposes the
//! engine as a JSON endpoint. Both map failures via [`AppError`](crate::error::AppError).

pub mod form;
pub mod validation;
