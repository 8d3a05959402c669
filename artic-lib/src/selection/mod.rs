//! Cross-page selection.

mod accumulate;
mod set;

pub use accumulate::*;
pub use set::*;
