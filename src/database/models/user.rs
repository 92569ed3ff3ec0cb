use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `users` table consulted by the login route
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
}
