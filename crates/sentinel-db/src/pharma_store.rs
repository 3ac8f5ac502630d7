//! CRUD operations on the `"Pharma"` table.

use sentinel_types::{NewPharma, Pharma, PharmaPatch};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;

/// Column list shared by every pharma query.
const COLUMNS: &str = r#""id", "name", "address", "city", "state", "pincode", "contact", "createdAt", "updatedAt""#;

/// Operations on the `"Pharma"` table.
pub struct PharmaStore<'a> {
    pool: &'a PgPool,
}

impl<'a> PharmaStore<'a> {
    /// Create a new pharma store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pharmacy and return the stored row.
    ///
    /// Missing mandatory fields are rejected by the table's `NOT NULL`
    /// constraints.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the insert fails.
    pub async fn create(&self, new: &NewPharma) -> Result<Pharma, DbError> {
        let sql = format!(
            r#"INSERT INTO "Pharma" ("name", "address", "city", "state", "pincode", "contact")
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {COLUMNS}"#
        );

        let row = sqlx::query_as::<_, Pharma>(&sql)
            .bind(new.name.as_deref())
            .bind(new.address.as_deref())
            .bind(new.city.as_deref())
            .bind(new.state.as_deref())
            .bind(new.pincode)
            .bind(new.contact.as_deref())
            .fetch_one(self.pool)
            .await?;

        tracing::debug!(id = %row.id, "Inserted pharma");
        Ok(row)
    }

    /// The most recently created pharmacies, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Pharma>, DbError> {
        let sql = format!(
            r#"SELECT {COLUMNS} FROM "Pharma" ORDER BY "createdAt" DESC LIMIT $1"#
        );

        let rows = sqlx::query_as::<_, Pharma>(&sql)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Fetch a single pharmacy.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, id: Uuid) -> Result<Option<Pharma>, DbError> {
        let sql = format!(r#"SELECT {COLUMNS} FROM "Pharma" WHERE "id" = $1"#);

        let row = sqlx::query_as::<_, Pharma>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }

    /// Apply a partial update. Absent fields keep their stored value; an
    /// explicit `null` clears `contact`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no pharmacy has this id, or
    /// [`DbError::Postgres`] if the update fails.
    pub async fn update(&self, id: Uuid, patch: &PharmaPatch) -> Result<Pharma, DbError> {
        let sql = format!(
            r#"UPDATE "Pharma" SET
                   "name" = COALESCE($2, "name"),
                   "address" = COALESCE($3, "address"),
                   "city" = COALESCE($4, "city"),
                   "state" = COALESCE($5, "state"),
                   "pincode" = COALESCE($6, "pincode"),
                   "contact" = CASE WHEN $7 THEN $8 ELSE "contact" END,
                   "updatedAt" = now()
               WHERE "id" = $1
               RETURNING {COLUMNS}"#
        );

        sqlx::query_as::<_, Pharma>(&sql)
            .bind(id)
            .bind(patch.name.as_deref())
            .bind(patch.address.as_deref())
            .bind(patch.city.as_deref())
            .bind(patch.state.as_deref())
            .bind(patch.pincode)
            .bind(patch.contact.is_some())
            .bind(patch.contact.as_ref().and_then(Option::as_deref))
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("pharma {id}")))
    }

    /// Physically delete a pharmacy.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no pharmacy has this id, or
    /// [`DbError::Postgres`] if the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = sqlx::query(r#"DELETE FROM "Pharma" WHERE "id" = $1"#)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound(format!("pharma {id}")));
        }
        Ok(())
    }
}
