use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A login identity. Never serialized to clients.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbAccount {
    pub username: String,
    pub password_hash: String,
}

/// Stored enquiry as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub furniture_type: String,
    pub message: String,
    #[serde(rename = "timestamp")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Submission payload. Text fields are stored as given; absent ones become empty.
/// The timestamp is caller-supplied, not server time, and may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewEnquiry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub furniture_type: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "timestamp")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl NewEnquiry {
    pub(crate) fn into_enquiry(self, id: i64) -> Enquiry {
        Enquiry {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            furniture_type: self.furniture_type,
            message: self.message,
            submitted_at: self.submitted_at,
        }
    }
}
