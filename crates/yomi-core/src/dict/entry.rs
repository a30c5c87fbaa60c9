use serde::{Deserialize, Serialize};

/// A reading for some surface form. `reading` is katakana, as morphological
/// dictionaries store it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub reading: String,
    pub cost: i16,
}

impl DictEntry {
    pub fn new(reading: impl Into<String>, cost: i16) -> Self {
        Self {
            reading: reading.into(),
            cost,
        }
    }
}
