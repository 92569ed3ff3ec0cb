use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::config::SeedUser;
use crate::database::manager::DatabaseError;
use crate::database::models::User;

/// Credential check behind POST /api/login
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DatabaseError>;
}

/// Accounts held in memory, loaded from configuration
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: HashMap<String, String>,
}

impl MemoryUserDirectory {
    pub fn new(users: &[SeedUser]) -> Self {
        Self {
            users: users
                .iter()
                .map(|u| (u.username.clone(), u.password.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DatabaseError> {
        Ok(self.users.get(username).is_some_and(|stored| stored == password))
    }
}

/// Accounts in the `users` table
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert configured accounts that do not exist yet
    pub async fn seed(&self, users: &[SeedUser]) -> Result<(), DatabaseError> {
        for user in users {
            sqlx::query(
                "INSERT INTO users (username, password) VALUES ($1, $2) ON CONFLICT (username) DO NOTHING",
            )
            .bind(&user.username)
            .bind(&user.password)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> Result<bool, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password FROM users WHERE username = $1 AND password = $2",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_directory_checks_password() {
        let directory = MemoryUserDirectory::new(&[SeedUser {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }]);

        assert!(directory.authenticate("alice", "secret").await.unwrap());
        assert!(!directory.authenticate("alice", "wrong").await.unwrap());
        assert!(!directory.authenticate("mallory", "secret").await.unwrap());
    }
}
