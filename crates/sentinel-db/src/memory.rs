//! In-memory gateway backend.
//!
//! Mirrors the ordering, filtering, and constraint behavior of the
//! `PostgreSQL` stores over plain vectors behind a [`RwLock`]. Used by the
//! API tests and when the server runs without a database. The
//! `insert_hospital_record` and `insert_summary` methods stand in for the
//! external jobs that write those tables in production.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sentinel_types::{
    AggregatedSummary, HospitalFilter, HospitalRecord, NewPharma, NewSocialPost, PageRequest,
    Pharma, PharmaPatch, SocialPost, SocialPostPatch,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, Default)]
struct Tables {
    hospital_records: Vec<HospitalRecord>,
    pharmas: Vec<Pharma>,
    social_posts: Vec<SocialPost>,
    summaries: Vec<AggregatedSummary>,
    hospital_seq: i64,
    summary_seq: i64,
}

/// Shared in-memory tables. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Hospital records
    // -----------------------------------------------------------------------

    /// Insert a hospital record, assigning the next sequential id.
    pub async fn insert_hospital_record(&self, mut record: HospitalRecord) -> HospitalRecord {
        let mut tables = self.tables.write().await;
        tables.hospital_seq = tables.hospital_seq.saturating_add(1);
        record.id = tables.hospital_seq;
        tables.hospital_records.push(record.clone());
        record
    }

    /// See [`crate::HospitalStore::list`].
    pub async fn list_hospital_records(&self, filter: &HospitalFilter) -> Vec<HospitalRecord> {
        let tables = self.tables.read().await;
        let mut rows: Vec<HospitalRecord> = tables
            .hospital_records
            .iter()
            .filter(|r| {
                filter
                    .district
                    .as_deref()
                    .is_none_or(|district| r.district == district)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.visit_date.cmp(&a.visit_date));
        paginate(rows, filter.page)
    }

    /// See [`crate::HospitalStore::get`].
    pub async fn get_hospital_record(&self, id: i64) -> Option<HospitalRecord> {
        let tables = self.tables.read().await;
        tables.hospital_records.iter().find(|r| r.id == id).cloned()
    }

    // -----------------------------------------------------------------------
    // Pharma
    // -----------------------------------------------------------------------

    /// See [`crate::PharmaStore::create`].
    pub async fn create_pharma(&self, new: &NewPharma) -> Result<Pharma, DbError> {
        let now = Utc::now();
        let pharma = Pharma {
            id: Uuid::now_v7(),
            name: not_null(new.name.as_ref(), "name")?,
            address: not_null(new.address.as_ref(), "address")?,
            city: not_null(new.city.as_ref(), "city")?,
            state: not_null(new.state.as_ref(), "state")?,
            pincode: new
                .pincode
                .ok_or_else(|| DbError::Constraint(String::from("pincode is null")))?,
            contact: new.contact.clone(),
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.pharmas.push(pharma.clone());
        Ok(pharma)
    }

    /// See [`crate::PharmaStore::list_recent`].
    pub async fn list_pharmas(&self, limit: i64) -> Vec<Pharma> {
        let tables = self.tables.read().await;
        let mut rows = tables.pharmas.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(to_usize(limit));
        rows
    }

    /// See [`crate::PharmaStore::get`].
    pub async fn get_pharma(&self, id: Uuid) -> Option<Pharma> {
        let tables = self.tables.read().await;
        tables.pharmas.iter().find(|p| p.id == id).cloned()
    }

    /// See [`crate::PharmaStore::update`].
    pub async fn update_pharma(&self, id: Uuid, patch: &PharmaPatch) -> Result<Pharma, DbError> {
        let mut tables = self.tables.write().await;
        let pharma = tables
            .pharmas
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::NotFound(format!("pharma {id}")))?;

        replace(&mut pharma.name, patch.name.as_ref());
        replace(&mut pharma.address, patch.address.as_ref());
        replace(&mut pharma.city, patch.city.as_ref());
        replace(&mut pharma.state, patch.state.as_ref());
        if let Some(pincode) = patch.pincode {
            pharma.pincode = pincode;
        }
        if let Some(contact) = &patch.contact {
            pharma.contact.clone_from(contact);
        }
        pharma.updated_at = Utc::now();
        Ok(pharma.clone())
    }

    /// See [`crate::PharmaStore::delete`].
    pub async fn delete_pharma(&self, id: Uuid) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.pharmas.len();
        tables.pharmas.retain(|p| p.id != id);
        if tables.pharmas.len() == before {
            return Err(DbError::NotFound(format!("pharma {id}")));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Social posts
    // -----------------------------------------------------------------------

    /// See [`crate::SocialStore::create`].
    pub async fn create_social_post(&self, new: &NewSocialPost) -> Result<SocialPost, DbError> {
        let now = Utc::now();
        let post = SocialPost {
            id: Uuid::now_v7(),
            platform: not_null(new.platform.as_ref(), "platform")?,
            content: not_null(new.content.as_ref(), "content")?,
            district: not_null(new.district.as_ref(), "district")?,
            sentiment: new.sentiment.clone(),
            reach: new.reach.clone(),
            created_at: now,
            updated_at: now,
        };

        self.tables.write().await.social_posts.push(post.clone());
        Ok(post)
    }

    /// See [`crate::SocialStore::list_recent`].
    pub async fn list_social_posts(&self, limit: i64) -> Vec<SocialPost> {
        let tables = self.tables.read().await;
        let mut rows = tables.social_posts.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(to_usize(limit));
        rows
    }

    /// See [`crate::SocialStore::get`].
    pub async fn get_social_post(&self, id: Uuid) -> Option<SocialPost> {
        let tables = self.tables.read().await;
        tables.social_posts.iter().find(|p| p.id == id).cloned()
    }

    /// See [`crate::SocialStore::update`].
    pub async fn update_social_post(
        &self,
        id: Uuid,
        patch: &SocialPostPatch,
    ) -> Result<SocialPost, DbError> {
        let mut tables = self.tables.write().await;
        let post = tables
            .social_posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::NotFound(format!("social post {id}")))?;

        replace(&mut post.platform, patch.platform.as_ref());
        replace(&mut post.content, patch.content.as_ref());
        replace(&mut post.district, patch.district.as_ref());
        if let Some(sentiment) = &patch.sentiment {
            post.sentiment.clone_from(sentiment);
        }
        if let Some(reach) = &patch.reach {
            post.reach.clone_from(reach);
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    /// See [`crate::SocialStore::delete`].
    pub async fn delete_social_post(&self, id: Uuid) -> Result<(), DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.social_posts.len();
        tables.social_posts.retain(|p| p.id != id);
        if tables.social_posts.len() == before {
            return Err(DbError::NotFound(format!("social post {id}")));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Aggregated summaries
    // -----------------------------------------------------------------------

    /// Insert a summary, assigning the next sequential id.
    ///
    /// `created_at` is kept as given so callers can place a row on either
    /// side of a poll window.
    pub async fn insert_summary(&self, mut summary: AggregatedSummary) -> AggregatedSummary {
        let mut tables = self.tables.write().await;
        tables.summary_seq = tables.summary_seq.saturating_add(1);
        summary.id = tables.summary_seq;
        tables.summaries.push(summary.clone());
        summary
    }

    /// See [`crate::SummaryStore::latest_per_district`].
    pub async fn latest_summaries(&self) -> Vec<AggregatedSummary> {
        let tables = self.tables.read().await;
        let mut rows = tables.summaries.clone();
        rows.sort_by(|a, b| {
            a.district
                .cmp(&b.district)
                .then_with(|| b.date.cmp(&a.date))
                .then_with(|| b.id.cmp(&a.id))
        });
        rows.dedup_by(|later, first| later.district == first.district);
        rows
    }

    /// See [`crate::SummaryStore::district_trend`].
    pub async fn district_trend(&self, district: &str, limit: i64) -> Vec<AggregatedSummary> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AggregatedSummary> = tables
            .summaries
            .iter()
            .filter(|s| s.district == district)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows.truncate(to_usize(limit));
        rows.reverse();
        rows
    }

    /// See [`crate::SummaryStore::list`].
    pub async fn list_summaries(&self, page: PageRequest) -> Vec<AggregatedSummary> {
        let tables = self.tables.read().await;
        let mut rows = tables.summaries.clone();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        paginate(rows, page)
    }

    /// See [`crate::SummaryStore::at_or_above`].
    pub async fn alert_summaries(&self, threshold: f64, limit: i64) -> Vec<AggregatedSummary> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AggregatedSummary> = tables
            .summaries
            .iter()
            .filter(|s| s.outbreak_risk_score >= threshold)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.outbreak_risk_score.total_cmp(&a.outbreak_risk_score));
        rows.truncate(to_usize(limit));
        rows
    }

    /// See [`crate::SummaryStore::created_between`].
    pub async fn summaries_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Vec<AggregatedSummary> {
        let tables = self.tables.read().await;
        let mut rows: Vec<AggregatedSummary> = tables
            .summaries
            .iter()
            .filter(|s| s.created_at >= from && s.created_at < to)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Emulate a `NOT NULL` text column.
fn not_null(value: Option<&String>, column: &str) -> Result<String, DbError> {
    value
        .cloned()
        .ok_or_else(|| DbError::Constraint(format!("{column} is null")))
}

/// Emulate `COALESCE($n, "column")`.
fn replace(target: &mut String, value: Option<&String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

fn to_usize(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}

fn paginate<T>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
    rows.into_iter()
        .skip(offset)
        .take(to_usize(page.limit))
        .collect()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, d, 0, 0, 0).single().unwrap()
    }

    fn summary(district: &str, date: DateTime<Utc>, score: f64) -> AggregatedSummary {
        AggregatedSummary {
            id: 0,
            district: district.to_owned(),
            date,
            hospital_case_count: 1,
            severe_case_count: 0,
            pharma_sales_count: 1,
            social_posts_count: 1,
            negative_posts_count: 0,
            outbreak_risk_score: score,
            alert_level: None,
            created_at: date,
        }
    }

    fn visit(district: &str, date: DateTime<Utc>) -> HospitalRecord {
        HospitalRecord {
            id: 0,
            patient_id: None,
            district: district.to_owned(),
            hospital_id: None,
            doctor_id: None,
            reported_by: None,
            age: Some(30),
            gender: None,
            symptoms: None,
            diagnosis: None,
            severity: None,
            outcome: None,
            visit_date: date,
            created_at: date,
        }
    }

    #[tokio::test]
    async fn hospital_list_filters_sorts_and_pages() {
        let store = MemoryStore::new();
        for d in 1..=5 {
            store.insert_hospital_record(visit("Kamrup", day(d))).await;
        }
        store.insert_hospital_record(visit("Jorhat", day(9))).await;

        let filter = HospitalFilter::new(
            Some(String::from("Kamrup")),
            PageRequest::new(Some(2), Some(2)),
        );
        let rows = store.list_hospital_records(&filter).await;
        let days: Vec<_> = rows.iter().map(|r| r.visit_date).collect();
        assert_eq!(days, vec![day(3), day(2)]);
    }

    #[tokio::test]
    async fn hospital_ids_are_sequential() {
        let store = MemoryStore::new();
        let a = store.insert_hospital_record(visit("Kamrup", day(1))).await;
        let b = store.insert_hospital_record(visit("Kamrup", day(2))).await;
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.get_hospital_record(2).await, Some(b));
        assert!(store.get_hospital_record(3).await.is_none());
    }

    #[tokio::test]
    async fn pharma_create_rejects_null_column() {
        let store = MemoryStore::new();
        let result = store.create_pharma(&NewPharma::default()).await;
        assert!(matches!(result, Err(DbError::Constraint(_))));
        assert!(store.list_pharmas(50).await.is_empty());
    }

    #[tokio::test]
    async fn pharma_patch_keeps_absent_fields() {
        let store = MemoryStore::new();
        let created = store
            .create_pharma(&NewPharma {
                name: Some(String::from("City Meds")),
                address: Some(String::from("12 MG Road")),
                city: Some(String::from("Guwahati")),
                state: Some(String::from("Assam")),
                pincode: Some(781_001),
                contact: None,
            })
            .await
            .unwrap();

        let updated = store
            .update_pharma(
                created.id,
                &PharmaPatch {
                    city: Some(String::from("Tezpur")),
                    ..PharmaPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.city, "Tezpur");
        assert_eq!(updated.name, "City Meds");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn social_patch_clears_explicit_nulls_only() {
        let store = MemoryStore::new();
        let created = store
            .create_social_post(&NewSocialPost {
                platform: Some(String::from("Twitter")),
                content: Some(String::from("Fever cases rising")),
                district: Some(String::from("Kamrup")),
                sentiment: Some(String::from("Negative")),
                reach: Some(String::from("High")),
            })
            .await
            .unwrap();

        let updated = store
            .update_social_post(
                created.id,
                &SocialPostPatch {
                    sentiment: Some(None),
                    ..SocialPostPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.sentiment.is_none());
        assert_eq!(updated.reach.as_deref(), Some("High"));
    }

    #[tokio::test]
    async fn delete_missing_social_post_is_not_found() {
        let store = MemoryStore::new();
        let result = store.delete_social_post(Uuid::now_v7()).await;
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn latest_keeps_newest_row_per_district() {
        let store = MemoryStore::new();
        store.insert_summary(summary("Kamrup", day(1), 0.2)).await;
        store.insert_summary(summary("Kamrup", day(3), 0.6)).await;
        store.insert_summary(summary("Dibrugarh", day(2), 0.9)).await;
        store.insert_summary(summary("Kamrup", day(2), 0.4)).await;

        let latest = store.latest_summaries().await;
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].district, "Dibrugarh");
        assert_eq!(latest[1].district, "Kamrup");
        assert_eq!(latest[1].date, day(3));
    }

    #[tokio::test]
    async fn trend_returns_most_recent_window_ascending() {
        let store = MemoryStore::new();
        for d in 1..=10 {
            store.insert_summary(summary("Kamrup", day(d), 0.1)).await;
        }

        let trend = store.district_trend("Kamrup", 3).await;
        let days: Vec<_> = trend.iter().map(|s| s.date).collect();
        assert_eq!(days, vec![day(8), day(9), day(10)]);
    }

    #[tokio::test]
    async fn alerts_filter_and_sort_descending() {
        let store = MemoryStore::new();
        store.insert_summary(summary("A", day(1), 0.5)).await;
        store.insert_summary(summary("B", day(1), 0.95)).await;
        store.insert_summary(summary("C", day(1), 0.9)).await;

        let alerts = store.alert_summaries(0.9, 50).await;
        let districts: Vec<_> = alerts.iter().map(|s| s.district.as_str()).collect();
        assert_eq!(districts, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn created_between_is_half_open() {
        let store = MemoryStore::new();
        let start = day(5);
        store.insert_summary(summary("A", start, 0.1)).await;
        store
            .insert_summary(summary("B", start + Duration::seconds(10), 0.1))
            .await;

        let rows = store
            .summaries_created_between(start, start + Duration::seconds(10))
            .await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district, "A");
    }
}
