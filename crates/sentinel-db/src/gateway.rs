//! The persistence gateway used by every route handler and the poller.
//!
//! [`Gateway`] uses enum dispatch instead of a trait object because async
//! methods are not dyn-compatible. Both backends implement the same
//! contract: identical ordering, filtering, and not-found behavior.

use chrono::{DateTime, Utc};
use sentinel_types::{
    AggregatedSummary, HospitalFilter, HospitalRecord, NewPharma, NewSocialPost, PageRequest,
    Pharma, PharmaPatch, SocialPost, SocialPostPatch,
};
use uuid::Uuid;

use crate::error::DbError;
use crate::hospital_store::HospitalStore;
use crate::memory::MemoryStore;
use crate::pharma_store::PharmaStore;
use crate::postgres::PostgresPool;
use crate::social_store::SocialStore;
use crate::summary_store::SummaryStore;

/// Typed access to every entity, backed by `PostgreSQL` or memory.
#[derive(Clone)]
pub enum Gateway {
    /// `PostgreSQL` through a shared sqlx pool.
    Postgres(PostgresPool),
    /// Process-local tables.
    Memory(MemoryStore),
}

impl Gateway {
    /// Human-readable backend name for logging.
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    // -----------------------------------------------------------------------
    // Hospital records
    // -----------------------------------------------------------------------

    /// List hospital records, newest visit first.
    pub async fn list_hospital_records(
        &self,
        filter: &HospitalFilter,
    ) -> Result<Vec<HospitalRecord>, DbError> {
        match self {
            Self::Postgres(pg) => HospitalStore::new(pg.pool()).list(filter).await,
            Self::Memory(mem) => Ok(mem.list_hospital_records(filter).await),
        }
    }

    /// Fetch one hospital record.
    pub async fn get_hospital_record(&self, id: i64) -> Result<Option<HospitalRecord>, DbError> {
        match self {
            Self::Postgres(pg) => HospitalStore::new(pg.pool()).get(id).await,
            Self::Memory(mem) => Ok(mem.get_hospital_record(id).await),
        }
    }

    // -----------------------------------------------------------------------
    // Pharma
    // -----------------------------------------------------------------------

    /// Insert a pharmacy.
    pub async fn create_pharma(&self, new: &NewPharma) -> Result<Pharma, DbError> {
        match self {
            Self::Postgres(pg) => PharmaStore::new(pg.pool()).create(new).await,
            Self::Memory(mem) => mem.create_pharma(new).await,
        }
    }

    /// The most recently created pharmacies.
    pub async fn list_pharmas(&self, limit: i64) -> Result<Vec<Pharma>, DbError> {
        match self {
            Self::Postgres(pg) => PharmaStore::new(pg.pool()).list_recent(limit).await,
            Self::Memory(mem) => Ok(mem.list_pharmas(limit).await),
        }
    }

    /// Fetch one pharmacy.
    pub async fn get_pharma(&self, id: Uuid) -> Result<Option<Pharma>, DbError> {
        match self {
            Self::Postgres(pg) => PharmaStore::new(pg.pool()).get(id).await,
            Self::Memory(mem) => Ok(mem.get_pharma(id).await),
        }
    }

    /// Partially update a pharmacy.
    pub async fn update_pharma(&self, id: Uuid, patch: &PharmaPatch) -> Result<Pharma, DbError> {
        match self {
            Self::Postgres(pg) => PharmaStore::new(pg.pool()).update(id, patch).await,
            Self::Memory(mem) => mem.update_pharma(id, patch).await,
        }
    }

    /// Delete a pharmacy.
    pub async fn delete_pharma(&self, id: Uuid) -> Result<(), DbError> {
        match self {
            Self::Postgres(pg) => PharmaStore::new(pg.pool()).delete(id).await,
            Self::Memory(mem) => mem.delete_pharma(id).await,
        }
    }

    // -----------------------------------------------------------------------
    // Social posts
    // -----------------------------------------------------------------------

    /// Insert a social post.
    pub async fn create_social_post(&self, new: &NewSocialPost) -> Result<SocialPost, DbError> {
        match self {
            Self::Postgres(pg) => SocialStore::new(pg.pool()).create(new).await,
            Self::Memory(mem) => mem.create_social_post(new).await,
        }
    }

    /// The most recently created posts.
    pub async fn list_social_posts(&self, limit: i64) -> Result<Vec<SocialPost>, DbError> {
        match self {
            Self::Postgres(pg) => SocialStore::new(pg.pool()).list_recent(limit).await,
            Self::Memory(mem) => Ok(mem.list_social_posts(limit).await),
        }
    }

    /// Fetch one social post.
    pub async fn get_social_post(&self, id: Uuid) -> Result<Option<SocialPost>, DbError> {
        match self {
            Self::Postgres(pg) => SocialStore::new(pg.pool()).get(id).await,
            Self::Memory(mem) => Ok(mem.get_social_post(id).await),
        }
    }

    /// Partially update a social post.
    pub async fn update_social_post(
        &self,
        id: Uuid,
        patch: &SocialPostPatch,
    ) -> Result<SocialPost, DbError> {
        match self {
            Self::Postgres(pg) => SocialStore::new(pg.pool()).update(id, patch).await,
            Self::Memory(mem) => mem.update_social_post(id, patch).await,
        }
    }

    /// Delete a social post.
    pub async fn delete_social_post(&self, id: Uuid) -> Result<(), DbError> {
        match self {
            Self::Postgres(pg) => SocialStore::new(pg.pool()).delete(id).await,
            Self::Memory(mem) => mem.delete_social_post(id).await,
        }
    }

    // -----------------------------------------------------------------------
    // Aggregated summaries
    // -----------------------------------------------------------------------

    /// The newest summary of each district.
    pub async fn latest_summaries(&self) -> Result<Vec<AggregatedSummary>, DbError> {
        match self {
            Self::Postgres(pg) => SummaryStore::new(pg.pool()).latest_per_district().await,
            Self::Memory(mem) => Ok(mem.latest_summaries().await),
        }
    }

    /// The `limit` most recent summaries of a district, oldest first.
    pub async fn district_trend(
        &self,
        district: &str,
        limit: i64,
    ) -> Result<Vec<AggregatedSummary>, DbError> {
        match self {
            Self::Postgres(pg) => {
                SummaryStore::new(pg.pool())
                    .district_trend(district, limit)
                    .await
            }
            Self::Memory(mem) => Ok(mem.district_trend(district, limit).await),
        }
    }

    /// All summaries, newest date first.
    pub async fn list_summaries(&self, page: PageRequest) -> Result<Vec<AggregatedSummary>, DbError> {
        match self {
            Self::Postgres(pg) => SummaryStore::new(pg.pool()).list(page).await,
            Self::Memory(mem) => Ok(mem.list_summaries(page).await),
        }
    }

    /// Summaries scoring at least `threshold`, highest first.
    pub async fn alert_summaries(
        &self,
        threshold: f64,
        limit: i64,
    ) -> Result<Vec<AggregatedSummary>, DbError> {
        match self {
            Self::Postgres(pg) => {
                SummaryStore::new(pg.pool())
                    .at_or_above(threshold, limit)
                    .await
            }
            Self::Memory(mem) => Ok(mem.alert_summaries(threshold, limit).await),
        }
    }

    /// Summaries inserted in `[from, to)`, oldest first.
    pub async fn summaries_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AggregatedSummary>, DbError> {
        match self {
            Self::Postgres(pg) => SummaryStore::new(pg.pool()).created_between(from, to).await,
            Self::Memory(mem) => Ok(mem.summaries_created_between(from, to).await),
        }
    }
}

impl From<PostgresPool> for Gateway {
    fn from(pool: PostgresPool) -> Self {
        Self::Postgres(pool)
    }
}

impl From<MemoryStore> for Gateway {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}
