//! Art Institute of Chicago catalog client library
//!
//! An async client for the public artwork listing endpoint, plus the
//! selection logic used to browse it page by page: a cross-page selection
//! set, bulk accumulation across pages, and a UI-agnostic page view
//! controller.

pub mod api;
pub mod error;
pub mod model;
pub mod selection;
pub mod source;
pub mod view;

mod client;

pub use client::*;
