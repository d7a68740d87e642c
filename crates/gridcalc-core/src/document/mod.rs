//! Document state and logic (UI-agnostic).

mod ops;
mod state;

pub use ops::{CellUpdate, WriteOutcome};
pub use state::Document;
