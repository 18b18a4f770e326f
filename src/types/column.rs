use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub id: u64,
    pub name: String,
}

impl Column {
    /// Attach the number of cards fetched for this column.
    pub fn with_count(self, count: usize) -> CountedColumn {
        CountedColumn {
            id: self.id,
            name: self.name,
            count,
        }
    }
}

/// A column once its cards have been counted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CountedColumn {
    pub id: u64,
    pub name: String,
    pub count: usize,
}
