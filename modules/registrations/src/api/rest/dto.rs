use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{
    EventSummary, NewRegistration, Registration, RegistrationDetails, UserSummary,
};

/// REST DTO for creating a registration.
///
/// Both ids arrive as raw strings so the service can report a missing,
/// empty or malformed id as a field violation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationReq {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// REST DTO for a stored registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDto {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub organizer_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummaryDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
}

/// Registration with its event and user embedded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDetailsDto {
    #[serde(flatten)]
    pub registration: RegistrationDto,
    pub event: EventSummaryDto,
    pub user: UserSummaryDto,
}

/// REST DTO for the registration list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationListDto {
    pub registrations: Vec<RegistrationDetailsDto>,
    pub total: usize,
}

// Conversion implementations between REST DTOs and contract models

impl From<Registration> for RegistrationDto {
    fn from(r: Registration) -> Self {
        Self {
            id: r.id,
            event_id: r.event_id,
            user_id: r.user_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl From<EventSummary> for EventSummaryDto {
    fn from(e: EventSummary) -> Self {
        Self {
            id: e.id,
            name: e.name,
            date: e.date,
            location: e.location,
            organizer_id: e.organizer_id,
        }
    }
}

impl From<UserSummary> for UserSummaryDto {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            role: u.role.as_str().to_owned(),
        }
    }
}

impl From<RegistrationDetails> for RegistrationDetailsDto {
    fn from(d: RegistrationDetails) -> Self {
        Self {
            registration: d.registration.into(),
            event: d.event.into(),
            user: d.user.into(),
        }
    }
}

impl From<CreateRegistrationReq> for NewRegistration {
    fn from(req: CreateRegistrationReq) -> Self {
        Self {
            event_id: req.event_id,
            user_id: req.user_id,
        }
    }
}
