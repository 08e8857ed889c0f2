use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A backend-persisted claim of a slot, as returned by the privileged
/// `GET /api/event-volunteer` endpoint and by every mutating endpoint.
///
/// The client never mutates these directly; it only asks the backend to
/// create, update, or delete them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    pub id: String,
    #[serde(default)]
    pub event_id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, alias = "notes")]
    pub note: Option<String>,
    /// Empty when the backend leaves it out; such records sort last.
    #[serde(default)]
    pub created_at: String,
}

/// The privacy-restricted shape served by `page-hydrate`. The backend omits
/// the email, so it is absent from the type rather than optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSignupRecord {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default, alias = "notes")]
    pub note: Option<String>,
    /// Empty when the backend leaves it out; such records sort last.
    #[serde(default)]
    pub created_at: String,
}

impl From<SignupRecord> for PublicSignupRecord {
    fn from(record: SignupRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            role: record.role,
            note: record.note,
            created_at: record.created_at,
        }
    }
}

/// Read access shared by both record shapes, so the roster and the slot rows
/// can work with either view.
pub trait Signup {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn role(&self) -> &str;
    fn note(&self) -> Option<&str>;
    fn created_at(&self) -> &str;

    /// `None` for records served by the public endpoint.
    fn email(&self) -> Option<&str>;

    fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at())
    }
}

impl Signup for SignupRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        &self.role
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn email(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl Signup for PublicSignupRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> &str {
        &self.role
    }

    fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    fn created_at(&self) -> &str {
        &self.created_at
    }

    fn email(&self) -> Option<&str> {
        None
    }
}

/// Parses an RFC 3339 timestamp as emitted by the backend.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}
