//! Write payloads for the mutable entities and their validation schema.
//!
//! Every field is an `Option` so a missing field reaches validation instead
//! of failing deserialization. Create payloads mark the mandatory fields
//! `required`; patch payloads only demand that a provided text field is
//! non-empty. Both go through [`check`], which turns a failed schema into one
//! message per offending field.
//!
//! A pincode may arrive as a JSON number or as text (form bodies); blank text
//! counts as absent. Nullable columns in a patch distinguish an absent field
//! (keep) from an explicit `null` (clear).

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::{Validate, ValidationErrors};

/// Body of `POST /api/pharma`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewPharma {
    /// Trading name (required).
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,
    /// Street address (required).
    #[validate(
        required(message = "address is required"),
        length(min = 1, message = "address must not be empty")
    )]
    pub address: Option<String>,
    /// City (required).
    #[validate(
        required(message = "city is required"),
        length(min = 1, message = "city must not be empty")
    )]
    pub city: Option<String>,
    /// State (required).
    #[validate(
        required(message = "state is required"),
        length(min = 1, message = "state must not be empty")
    )]
    pub state: Option<String>,
    /// Postal index number (required).
    #[serde(default, deserialize_with = "pincode")]
    #[validate(required(message = "pincode is required"))]
    pub pincode: Option<i32>,
    /// Phone or e-mail.
    pub contact: Option<String>,
}

/// Body of `PUT /api/pharma/{id}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(clippy::option_option)]
pub struct PharmaPatch {
    /// New trading name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    /// New street address.
    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,
    /// New city.
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: Option<String>,
    /// New state.
    #[validate(length(min = 1, message = "state must not be empty"))]
    pub state: Option<String>,
    /// New postal index number.
    #[serde(default, deserialize_with = "pincode")]
    pub pincode: Option<i32>,
    /// New contact; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub contact: Option<Option<String>>,
}

impl PharmaPatch {
    /// Whether the patch would change nothing.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.pincode.is_none()
            && self.contact.is_none()
    }
}

/// Body of `POST /api/social`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewSocialPost {
    /// Source platform (required).
    #[validate(
        required(message = "platform is required"),
        length(min = 1, message = "platform must not be empty")
    )]
    pub platform: Option<String>,
    /// Post text (required).
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content must not be empty")
    )]
    pub content: Option<String>,
    /// District the post refers to (required).
    #[validate(
        required(message = "district is required"),
        length(min = 1, message = "district must not be empty")
    )]
    pub district: Option<String>,
    /// Positive / Neutral / Negative.
    pub sentiment: Option<String>,
    /// Low / Medium / High.
    pub reach: Option<String>,
}

/// Body of `PUT /api/social/{id}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
#[allow(clippy::option_option)]
pub struct SocialPostPatch {
    /// New platform.
    #[validate(length(min = 1, message = "platform must not be empty"))]
    pub platform: Option<String>,
    /// New text.
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    /// New district.
    #[validate(length(min = 1, message = "district must not be empty"))]
    pub district: Option<String>,
    /// New sentiment; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub sentiment: Option<Option<String>>,
    /// New reach; `Some(None)` clears it.
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(optional)]
    pub reach: Option<Option<String>>,
}

impl SocialPostPatch {
    /// Whether the patch would change nothing.
    pub const fn is_empty(&self) -> bool {
        self.platform.is_none()
            && self.content.is_none()
            && self.district.is_none()
            && self.sentiment.is_none()
            && self.reach.is_none()
    }
}

fn pincode<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|e| de::Error::custom(format!("invalid pincode {text:?}: {e}")))
        }
    }
}

// Present field, `null` included, becomes `Some`; absence is left to `default`.
#[allow(clippy::option_option)]
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Run a payload's validation schema.
///
/// On failure returns one human-readable message per failing rule, sorted
/// by field name so responses are stable.
pub fn check<T: Validate>(payload: &T) -> Result<(), Vec<String>> {
    payload.validate().map_err(|errors| messages(&errors))
}

/// Flatten [`ValidationErrors`] into sorted messages.
pub fn messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full_pharma() -> NewPharma {
        NewPharma {
            name: Some(String::from("City Meds")),
            address: Some(String::from("12 MG Road")),
            city: Some(String::from("Guwahati")),
            state: Some(String::from("Assam")),
            pincode: Some(781_001),
            contact: None,
        }
    }

    #[test]
    fn complete_pharma_passes() {
        assert_eq!(check(&full_pharma()), Ok(()));
    }

    #[test]
    fn missing_pharma_fields_are_each_reported() {
        let payload = NewPharma {
            city: None,
            pincode: None,
            ..full_pharma()
        };

        let errors = check(&payload).unwrap_err();
        assert_eq!(
            errors,
            vec![
                String::from("city is required"),
                String::from("pincode is required"),
            ]
        );
    }

    #[test]
    fn empty_string_counts_as_missing() {
        let payload = NewPharma {
            name: Some(String::new()),
            ..full_pharma()
        };

        let errors = check(&payload).unwrap_err();
        assert_eq!(errors, vec![String::from("name must not be empty")]);
    }

    #[test]
    fn social_post_requires_platform_content_district() {
        let errors = check(&NewSocialPost::default()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e == "district is required"));
    }

    #[test]
    fn patch_accepts_partial_fields() {
        let patch = SocialPostPatch {
            sentiment: Some(Some(String::from("Negative"))),
            ..SocialPostPatch::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(check(&patch), Ok(()));
    }

    #[test]
    fn patch_rejects_blanked_required_field() {
        let patch = PharmaPatch {
            name: Some(String::new()),
            ..PharmaPatch::default()
        };
        assert!(check(&patch).is_err());
        assert!(PharmaPatch::default().is_empty());
    }

    #[test]
    fn optional_fields_default_to_none() {
        let payload: NewSocialPost = serde_json::from_str(
            r#"{"platform":"News","content":"Fever cases rising","district":"Dibrugarh"}"#,
        )
        .unwrap_or_default();
        assert_eq!(payload.district.as_deref(), Some("Dibrugarh"));
        assert!(payload.reach.is_none());
    }

    #[test]
    fn pincode_accepts_number_or_text() {
        let number: NewPharma = serde_json::from_str(r#"{"pincode":781001}"#).unwrap();
        assert_eq!(number.pincode, Some(781_001));

        let text: NewPharma = serde_json::from_str(r#"{"pincode":" 781001 "}"#).unwrap();
        assert_eq!(text.pincode, Some(781_001));

        assert!(serde_json::from_str::<NewPharma>(r#"{"pincode":"78x"}"#).is_err());
    }

    #[test]
    fn blank_pincode_is_reported_as_required() {
        let payload: NewPharma = serde_json::from_value(serde_json::json!({
            "name": "City Meds",
            "address": "12 MG Road",
            "city": "Guwahati",
            "state": "Assam",
            "pincode": "",
        }))
        .unwrap();
        assert!(payload.pincode.is_none());
        assert_eq!(
            check(&payload).unwrap_err(),
            vec![String::from("pincode is required")]
        );

        let patch: PharmaPatch = serde_json::from_str(r#"{"pincode":""}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn null_clears_while_absent_keeps() {
        let patch: PharmaPatch = serde_json::from_str(r#"{"contact":null}"#).unwrap();
        assert_eq!(patch.contact, Some(None));
        assert!(!patch.is_empty());

        let patch: PharmaPatch = serde_json::from_str(r#"{"name":"City Meds"}"#).unwrap();
        assert_eq!(patch.contact, None);

        let patch: SocialPostPatch =
            serde_json::from_str(r#"{"sentiment":null,"reach":"High"}"#).unwrap();
        assert_eq!(patch.sentiment, Some(None));
        assert_eq!(patch.reach, Some(Some(String::from("High"))));
    }
}
