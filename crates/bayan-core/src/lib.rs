//! bayan-core
//!
//! Pure domain types and site link conventions for the site assistant.
//! No I/O here: this is the shared vocabulary of the Bayan crates.

pub mod error;
pub mod links;
pub mod models;
