//! # searchdata
//!
//! Read-only record dataset backing the SearchPro suggestion engine.
//!
//! ## Architecture
//! - **Record**: `{id, name}` pairs, immutable once loaded
//! - **Dataset**: ordered in-memory collection, loaded once from JSON
//! - **Scan counter**: tracks full dataset scans so callers can verify
//!   cache effectiveness

#![warn(missing_docs)]

mod dataset;
mod error;
mod record;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use record::Record;
