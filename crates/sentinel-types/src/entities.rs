//! Persisted entities served by the surveillance API.
//!
//! Field names serialize as camelCase because the browser dashboard and the
//! external aggregation job both address rows by those names. The same names
//! are used as quoted column identifiers in `PostgreSQL`, so with the `sqlx`
//! feature enabled each struct decodes straight from a row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A single patient visit reported by a hospital, clinic, or field worker.
///
/// Written by the external ingestion job; the API only lists and reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow), sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HospitalRecord {
    /// Store-assigned sequential identifier.
    #[ts(type = "number")]
    pub id: i64,
    /// Anonymized patient reference (e.g. `P0042`).
    pub patient_id: Option<String>,
    /// District the visit was reported in.
    pub district: String,
    /// Reporting facility.
    pub hospital_id: Option<String>,
    /// Attending doctor.
    pub doctor_id: Option<String>,
    /// Who filed the report (ASHA worker, clinic, hospital).
    pub reported_by: Option<String>,
    /// Patient age in years.
    pub age: Option<i32>,
    /// Patient gender.
    pub gender: Option<String>,
    /// Presenting symptoms.
    pub symptoms: Option<String>,
    /// Diagnosed disease.
    pub diagnosis: Option<String>,
    /// Low / Medium / High.
    pub severity: Option<String>,
    /// Recovered / Hospitalized / Deceased.
    pub outcome: Option<String>,
    /// When the visit happened.
    pub visit_date: DateTime<Utc>,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}

/// A registered pharmacy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow), sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Pharma {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Trading name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Postal index number.
    pub pincode: i32,
    /// Phone or e-mail, if provided.
    pub contact: Option<String>,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}

/// A social-media or news post mentioning health conditions in a district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow), sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SocialPost {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Source platform (Twitter, Facebook, News, ...).
    pub platform: String,
    /// Post text.
    pub content: String,
    /// District the post refers to.
    pub district: String,
    /// Positive / Neutral / Negative.
    pub sentiment: Option<String>,
    /// Low / Medium / High.
    pub reach: Option<String>,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
    /// When the row was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Per-district, per-date outbreak risk computed by the aggregation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow), sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct AggregatedSummary {
    /// Store-assigned sequential identifier.
    #[ts(type = "number")]
    pub id: i64,
    /// District the summary covers.
    pub district: String,
    /// Day the summary covers.
    pub date: DateTime<Utc>,
    /// Hospital visits that day.
    pub hospital_case_count: i32,
    /// Visits with high severity.
    pub severe_case_count: i32,
    /// Pharmacy sales that day.
    pub pharma_sales_count: i32,
    /// Social posts that day.
    pub social_posts_count: i32,
    /// Posts with negative sentiment.
    pub negative_posts_count: i32,
    /// Risk score in `0.0..=1.0`.
    pub outbreak_risk_score: f64,
    /// Low / Medium / High.
    pub alert_level: Option<String>,
    /// When the row was inserted.
    pub created_at: DateTime<Utc>,
}
