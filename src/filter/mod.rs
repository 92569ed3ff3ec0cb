//! Tag filtering and working-contact state for the client.

pub mod engine;
pub mod tag_set;
pub mod visibility;
pub mod working;

pub use engine::TagFilterEngine;
pub use tag_set::TagFilterSet;
pub use visibility::compute_visibility;
pub use working::WorkingContact;
