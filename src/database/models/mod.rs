pub mod contact;
pub mod user;

pub use contact::{ContactChanges, NewContact};
pub use user::User;
