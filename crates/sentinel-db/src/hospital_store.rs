//! Read operations on the `"HospitalRecord"` table.
//!
//! Rows are inserted by the external ingestion job; this API only lists
//! and fetches them.

use sentinel_types::{HospitalFilter, HospitalRecord};
use sqlx::PgPool;

use crate::error::DbError;

/// Column list shared by every hospital query.
const COLUMNS: &str = r#""id", "patientId", "district", "hospitalId", "doctorId", "reportedBy", "age", "gender", "symptoms", "diagnosis", "severity", "outcome", "visitDate", "createdAt""#;

/// Operations on the `"HospitalRecord"` table.
pub struct HospitalStore<'a> {
    pool: &'a PgPool,
}

impl<'a> HospitalStore<'a> {
    /// Create a new hospital store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List records, newest visit first, optionally for one district.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self, filter: &HospitalFilter) -> Result<Vec<HospitalRecord>, DbError> {
        let sql = format!(
            r#"SELECT {COLUMNS}
               FROM "HospitalRecord"
               WHERE ($1::TEXT IS NULL OR "district" = $1)
               ORDER BY "visitDate" DESC
               LIMIT $2 OFFSET $3"#
        );

        let rows = sqlx::query_as::<_, HospitalRecord>(&sql)
            .bind(filter.district.as_deref())
            .bind(filter.page.limit)
            .bind(filter.page.offset)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Fetch a single record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn get(&self, id: i64) -> Result<Option<HospitalRecord>, DbError> {
        let sql = format!(r#"SELECT {COLUMNS} FROM "HospitalRecord" WHERE "id" = $1"#);

        let row = sqlx::query_as::<_, HospitalRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row)
    }
}
