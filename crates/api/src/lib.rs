//! Formgate HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! views) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod rules;
pub mod state;
pub mod views;
