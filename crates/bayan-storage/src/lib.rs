//! bayan-storage
//!
//! Client-local persistence for widget history. One storage key holds the
//! whole per-locale history map; callers read and write one locale at a
//! time through [`store::HistoryStore`].

pub mod error;
pub mod file;
pub mod memory;
pub mod store;
