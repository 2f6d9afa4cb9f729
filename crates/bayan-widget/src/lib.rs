//! bayan-widget
//!
//! Conversation session manager for the embedded site assistant: widget
//! lifecycle, per-locale history, the single in-flight reply guard, and
//! dispatch of suggested actions.

pub mod error;
pub mod navigator;
pub mod phase;
pub mod widget;
