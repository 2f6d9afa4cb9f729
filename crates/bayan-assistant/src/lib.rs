//! bayan-assistant
//!
//! Reply generation for the site assistant: the keyword intent classifier,
//! the bilingual reply table, and the client for the remote completion
//! endpoint used in AI mode.

pub mod classify;
pub mod completion;
pub mod error;
pub mod replies;
