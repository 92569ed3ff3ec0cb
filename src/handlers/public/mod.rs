// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition. No middleware layers are applied to these routes.
pub mod auth;

pub use auth::*;
