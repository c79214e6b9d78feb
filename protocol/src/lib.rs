//! Plain data shared between the OLLA CLI and its terminal UI.
//!
//! Nothing in this crate performs I/O: it only holds ids, scripted texts, the static display
//! data behind the finance screens, and number formatting helpers.

pub mod assets;
pub mod chat;
pub mod finance;
pub mod num_format;
