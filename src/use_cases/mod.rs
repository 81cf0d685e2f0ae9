//! Use cases (orchestration)
//!
//! Flows that combine device operations with key handle construction.

mod check_key_binding;
mod open_key_handle;

pub use check_key_binding::check_key_binding;
pub use open_key_handle::open_key_handle;
