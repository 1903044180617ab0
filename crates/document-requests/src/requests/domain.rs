use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::display::parse_timestamp;

/// Identifier of the signed-in applicant, supplied by the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl ApplicantId {
    /// Returns `None` for blank input; the session layer should never hand us one.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Submitted case record owned by an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub resident_id: ApplicantId,
    pub submitted_at: DateTime<Utc>,
}

/// Lifecycle of a document request as tracked by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRequestStatus {
    #[default]
    Pending,
    Fulfilled,
    Cancelled,
    Expired,
}

/// Raw document request as returned by the store.
///
/// Every field tolerates being absent, null or of the wrong type so partially populated
/// upstream rows still reach the applicant; timestamps that cannot be parsed are treated as
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRequestRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub token: String,
    #[serde(deserialize_with = "lenient_string")]
    pub document_type_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub applicant_type: String,
    #[serde(deserialize_with = "lenient_optional_string")]
    pub applicant_uuid: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub applicant_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub custom_message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub requested_by: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub requested_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Store row: a request plus the columns used to select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocumentRequest {
    pub application_id: ApplicationId,
    #[serde(default)]
    pub status: DocumentRequestStatus,
    #[serde(flatten)]
    pub record: DocumentRequestRecord,
}

/// Presentation-ready request handed to the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedDocumentRequest {
    #[serde(flatten)]
    pub request: DocumentRequestRecord,
    pub document_title: String,
    pub document_description: String,
    pub requesting_agent_name: &'static str,
    pub is_expired: bool,
}

impl EnrichedDocumentRequest {
    pub fn token(&self) -> &str {
        &self.request.token
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(Some(value)),
        _ => Ok(None),
    }
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_optional_string(deserializer)?;
    Ok(raw.and_then(|value| parse_timestamp(&value, Tz::UTC)))
}
