use serde::{Deserialize, Serialize};

/// A classic project board as listed under `/orgs/{org}/projects`.
///
/// `number` is the per-organization number used in routes; `id` is the
/// global id the column and card endpoints expect.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub number: u64,
    pub name: String,
    pub state: String,
}
