// handlers/public/auth/mod.rs - Public authentication handlers
pub mod login; // POST /api/login - authenticate and get JWT

pub use login::login_post;
