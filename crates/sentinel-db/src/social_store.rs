//! CRUD operations on the `"SocialPost"` table.

use sentinel_types::{NewSocialPost, SocialPost, SocialPostPatch};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Column list shared by every social post query.
const COLUMNS: &str = r#""id", "platform", "content", "district", "sentiment", "reach", "createdAt", "updatedAt""#;

/// Operations on the `"SocialPost"` table.
pub struct SocialStore<'a> {
    pool: &'a PgPool,
}

impl<'a> SocialStore<'a> {
    /// Create a new social post store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create(&self, new: &NewSocialPost) -> Result<SocialPost, DbError> {
        let sql = format!(
            r#"INSERT INTO "SocialPost" ("platform", "content", "district", "sentiment", "reach")
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {COLUMNS}"#
        );

        let row = sqlx::query_as::<_, SocialPost>(&sql)
            .bind(new.platform.as_deref())
            .bind(new.content.as_deref())
            .bind(new.district.as_deref())
            .bind(new.sentiment.as_deref())
            .bind(new.reach.as_deref())
            .fetch_one(self.pool)
            .await?;

        tracing::debug!(id = %row.id, district = row.district, "Inserted social post");
        Ok(row)
    }

    /// The most recently created posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<SocialPost>, DbError> {
        let sql = format!(
            r#"SELECT {COLUMNS} FROM "SocialPost" ORDER BY "createdAt" DESC LIMIT $1"#
        );

        let rows = sqlx::query_as::<_, SocialPost>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Fetch a single post.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, id: Uuid) -> Result<Option<SocialPost>, DbError> {
        let sql = format!(r#"SELECT {COLUMNS} FROM "SocialPost" WHERE "id" = $1"#);

        let row = sqlx::query_as::<_, SocialPost>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Apply a partial update. Absent fields keep their stored value; an
    /// explicit `null` clears `sentiment` or `reach`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no post has this id, or
    /// [`DbError::Postgres`] if the update fails.
    pub async fn update(&self, id: Uuid, patch: &SocialPostPatch) -> Result<SocialPost, DbError> {
        let sql = format!(
            r#"UPDATE "SocialPost" SET
                   "platform" = COALESCE($2, "platform"),
                   "content" = COALESCE($3, "content"),
                   "district" = COALESCE($4, "district"),
                   "sentiment" = CASE WHEN $5 THEN $6 ELSE "sentiment" END,
                   "reach" = CASE WHEN $7 THEN $8 ELSE "reach" END,
                   "updatedAt" = now()
               WHERE "id" = $1
               RETURNING {COLUMNS}"#
        );

        sqlx::query_as::<_, SocialPost>(&sql)
            .bind(id)
            .bind(patch.platform.as_deref())
            .bind(patch.content.as_deref())
            .bind(patch.district.as_deref())
            .bind(patch.sentiment.is_some())
            .bind(patch.sentiment.as_ref().and_then(Option::as_deref))
            .bind(patch.reach.is_some())
            .bind(patch.reach.as_ref().and_then(Option::as_deref))
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("social post {id}")))
    }

    /// Physically delete a post.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no post has this id, or
    /// [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query(r#"DELETE FROM "SocialPost" WHERE "id" = $1"#)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("social post {id}")));
        }
        Ok(())
    }
}
