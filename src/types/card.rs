use serde::{Deserialize, Serialize};

/// Only the cardinality of a column's cards matters, so a card keeps its id.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
}
