//! Read operations on the `"AggregatedSummary"` table.
//!
//! Rows are produced by the external aggregation job. Besides the REST
//! listings, [`SummaryStore::created_between`] feeds the realtime poller.

use chrono::{DateTime, Utc};
use sentinel_types::{AggregatedSummary, PageRequest};
use sqlx::PgPool;

use crate::error::DbError;

/// Column list shared by every summary query.
const COLUMNS: &str = r#""id", "district", "date", "hospitalCaseCount", "severeCaseCount", "pharmaSalesCount", "socialPostsCount", "negativePostsCount", "outbreakRiskScore", "alertLevel", "createdAt""#;

/// Operations on the `"AggregatedSummary"` table.
pub struct SummaryStore<'a> {
    pool: &'a PgPool,
}

impl<'a> SummaryStore<'a> {
    /// Create a new summary store bound to a connection pool.
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The most recent summary of every district, ordered by district.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn latest_per_district(&self) -> Result<Vec<AggregatedSummary>, DbError> {
        let sql = format!(
            r#"SELECT DISTINCT ON ("district") {COLUMNS}
               FROM "AggregatedSummary"
               ORDER BY "district", "date" DESC, "id" DESC"#
        );

        let rows = sqlx::query_as::<_, AggregatedSummary>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// The `limit` most recent summaries of a district, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn district_trend(
        &self,
        district: &str,
        limit: i64,
    ) -> Result<Vec<AggregatedSummary>, DbError> {
        let sql = format!(
            r#"SELECT * FROM (
                   SELECT {COLUMNS}
                   FROM "AggregatedSummary"
                   WHERE "district" = $1
                   ORDER BY "date" DESC
                   LIMIT $2
               ) AS recent
               ORDER BY "date" ASC"#
        );

        let rows = sqlx::query_as::<_, AggregatedSummary>(&sql)
            .bind(district)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// All summaries, newest date first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn list(&self, page: PageRequest) -> Result<Vec<AggregatedSummary>, DbError> {
        let sql = format!(
            r#"SELECT {COLUMNS}
               FROM "AggregatedSummary"
               ORDER BY "date" DESC
               LIMIT $1 OFFSET $2"#
        );

        let rows = sqlx::query_as::<_, AggregatedSummary>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Summaries whose risk score is at least `threshold`, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn at_or_above(
        &self,
        threshold: f64,
        limit: i64,
    ) -> Result<Vec<AggregatedSummary>, DbError> {
        let sql = format!(
            r#"SELECT {COLUMNS}
               FROM "AggregatedSummary"
               WHERE "outbreakRiskScore" >= $1
               ORDER BY "outbreakRiskScore" DESC
               LIMIT $2"#
        );

        let rows = sqlx::query_as::<_, AggregatedSummary>(&sql)
            .bind(threshold)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Summaries inserted in the half-open window `[from, to)`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AggregatedSummary>, DbError> {
        let sql = format!(
            r#"SELECT {COLUMNS}
               FROM "AggregatedSummary"
               WHERE "createdAt" >= $1 AND "createdAt" < $2
               ORDER BY "createdAt" ASC, "id" ASC"#
        );

        let rows = sqlx::query_as::<_, AggregatedSummary>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}
