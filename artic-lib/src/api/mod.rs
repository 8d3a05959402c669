//! API operations

pub mod listing;
