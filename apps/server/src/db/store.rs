//! PostgreSQL-backed resource store

use crate::{db::traits::ResourceStore, models::Resource, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};

/// Resource store backed by a PostgreSQL `resources` table
///
/// The resource body is stored as opaque JSONB; only the envelope fields
/// live in columns.
#[derive(Clone)]
pub struct PostgresResourceStore {
    pool: PgPool,
}

impl PostgresResourceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceStore for PostgresResourceStore {
    async fn put(&self, resource: Resource) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resources (id, resource_type, content, created_at, updated_at, deleted_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&resource.id)
        .bind(&resource.resource_type)
        .bind(&resource.content)
        .bind(resource.created_at)
        .bind(resource.updated_at)
        .bind(resource.deleted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, resource_type: &str, id: &str) -> Result<Option<Resource>> {
        let row = sqlx::query(
            r#"
            SELECT id, resource_type, content, created_at, updated_at, deleted_at
            FROM resources
            WHERE id = $1 AND resource_type = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(resource_type)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Resource {
            id: row.try_get::<String, _>("id")?,
            resource_type: row.try_get::<String, _>("resource_type")?,
            content: row.try_get::<JsonValue, _>("content")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
            deleted_at: row.try_get::<Option<DateTime<Utc>>, _>("deleted_at")?,
        }))
    }
}
