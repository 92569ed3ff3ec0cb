pub mod form;
pub mod tags;

pub use form::{ContactForm, LoginForm};
pub use tags::{join_tags, split_tags};
