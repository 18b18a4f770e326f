mod badge;
mod card;
mod column;
mod project;

pub use badge::BadgeDescriptor;
pub use card::Card;
pub use column::{Column, CountedColumn};
pub use project::Project;
