//! gridcalc_engine - Spreadsheet formula engine.
//!
//! Pure computation, no UI: the caller hands every operation the sheet it
//! should read, and gets values or errors back. Nothing in here touches a
//! presentation surface or holds state between calls.

pub(crate) mod builtins;
pub mod engine;
pub mod error;
