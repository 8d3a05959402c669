//! Data model types

mod artwork;
mod page;
mod pagination;

pub use artwork::*;
pub use page::*;
pub use pagination::*;
