//! Record model shared by the dataset and the suggestion pipeline

use serde::{Deserialize, Serialize};

/// A single searchable entry
///
/// The engine matches on `name` and reports both fields back to the
/// caller. Records never change after the dataset is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier within the dataset
    pub id: u64,

    /// Display name, also the match target
    pub name: String,
}
