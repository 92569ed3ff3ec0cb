use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use std::fmt::Debug;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{ContactChanges, NewContact};
use crate::database::store::ContactStore;
use crate::types::Contact;

const CONTACT_COLUMNS: &str = "id, full_name, email, phone_number, tags";

#[derive(Debug, FromRow)]
struct ContactRow {
    id: Uuid,
    full_name: String,
    email: String,
    phone_number: String,
    tags: Vec<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id.to_string(),
            full_name: row.full_name,
            email: row.email,
            phone_number: row.phone_number,
            tags: row.tags,
        }
    }
}

/// Relational backend over the `contacts` table
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
    log_queries: bool,
}

impl PgContactStore {
    pub fn new(pool: PgPool, log_queries: bool) -> Self {
        Self { pool, log_queries }
    }

    fn log_query(&self, statement: &str, params: &dyn Debug) {
        if self.log_queries {
            tracing::debug!(target: "contacts_api_rust::sql", "{} {:?}", statement.trim(), params);
        }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list(&self) -> Result<Vec<Contact>, DatabaseError> {
        let sql = format!("SELECT {} FROM contacts ORDER BY created_at, id", CONTACT_COLUMNS);
        self.log_query(&sql, &());

        let rows = sqlx::query_as::<_, ContactRow>(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Contact>, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let sql = format!("SELECT {} FROM contacts WHERE id = $1", CONTACT_COLUMNS);
        self.log_query(&sql, &id);

        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Contact::from))
    }

    async fn create(&self, contact: NewContact) -> Result<Contact, DatabaseError> {
        let sql = format!(
            "INSERT INTO contacts (id, full_name, email, phone_number, tags) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            CONTACT_COLUMNS
        );
        let id = Uuid::new_v4();
        self.log_query(&sql, &(&id, &contact));

        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .bind(&contact.full_name)
            .bind(&contact.email)
            .bind(&contact.phone_number)
            .bind(&contact.tags)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update(&self, id: &str, changes: ContactChanges) -> Result<Option<Contact>, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let sql = format!(
            "UPDATE contacts SET \
                full_name = COALESCE($2, full_name), \
                email = COALESCE($3, email), \
                phone_number = COALESCE($4, phone_number), \
                tags = COALESCE($5, tags) \
             WHERE id = $1 RETURNING {}",
            CONTACT_COLUMNS
        );
        self.log_query(&sql, &(&id, &changes));

        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .bind(changes.full_name)
            .bind(changes.email)
            .bind(changes.phone_number)
            .bind(changes.tags)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Contact::from))
    }

    async fn remove(&self, id: &str) -> Result<bool, DatabaseError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(false);
        };

        let sql = "DELETE FROM contacts WHERE id = $1";
        self.log_query(sql, &id);

        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
