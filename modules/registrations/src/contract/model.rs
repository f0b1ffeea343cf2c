use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A user's enrollment in one event (no serde: transport types live in `api::rest::dto`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw registration request. Fields are unvalidated and may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewRegistration {
    pub event_id: Option<String>,
    pub user_id: Option<String>,
}

impl NewRegistration {
    pub fn new(event_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            event_id: Some(event_id.into()),
            user_id: Some(user_id.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserRole {
    Attendee,
    Organizer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Attendee => "attendee",
            UserRole::Organizer => "organizer",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a user, owned by the users service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

/// Read-only view of an event, owned by the events service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer_id: Uuid,
}

/// A registration joined with the event and user it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    pub registration: Registration,
    pub event: EventSummary,
    pub user: UserSummary,
}
