use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::{Uuid, Variant};

use crate::contract::error::FieldViolation;
use crate::contract::model::{NewRegistration, Registration, RegistrationDetails};
use crate::domain::error::DomainError;
use crate::domain::repo::{InsertError, RegistrationsRepository};

/// Domain service with business rules for event registrations.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn RegistrationsRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn RegistrationsRepository>) -> Self {
        Self { repo }
    }

    /// Register `user_id` for `event_id`.
    ///
    /// Checks run in a fixed order: input shape, event, user, existing
    /// registration. The unique index on (event_id, user_id) backs the
    /// pre-check; losing an insert race is reported as the same conflict.
    #[instrument(
        name = "registrations.service.register",
        skip(self, req),
        fields(
            event_id = %req.event_id.as_deref().unwrap_or_default(),
            user_id = %req.user_id.as_deref().unwrap_or_default()
        )
    )]
    pub async fn register(&self, req: NewRegistration) -> Result<Registration, DomainError> {
        info!("Registering user for event");

        let (event_id, user_id) = validate_new_registration(&req)?;

        self.repo
            .find_event_by_id(event_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::event_not_found(event_id))?;

        self.repo
            .find_user_by_id(user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        if self
            .repo
            .find_registration(event_id, user_id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .is_some()
        {
            return Err(DomainError::already_registered(event_id, user_id));
        }

        // Stored timestamps have microsecond precision.
        let now = Utc::now().trunc_subsecs(6);
        let registration = Registration {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            created_at: now,
            updated_at: now,
        };

        match self.repo.insert_registration(registration.clone()).await {
            Ok(()) => {}
            Err(InsertError::Duplicate) => {
                warn!("Concurrent registration won the unique index");
                return Err(DomainError::already_registered(event_id, user_id));
            }
            Err(InsertError::Other(e)) => return Err(DomainError::database(e.to_string())),
        }

        info!(registration_id = %registration.id, "Successfully registered user");
        Ok(registration)
    }

    #[instrument(name = "registrations.service.list_registrations", skip(self))]
    pub async fn list_registrations(&self) -> Result<Vec<RegistrationDetails>, DomainError> {
        debug!("Listing registrations");

        let items = self
            .repo
            .list_registrations_with_event_and_user()
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Successfully listed {} registrations", items.len());
        Ok(items)
    }
}

/// Check both identifiers, collecting every violation.
fn validate_new_registration(req: &NewRegistration) -> Result<(Uuid, Uuid), DomainError> {
    let mut violations = Vec::new();
    let event_id = check_id(
        req.event_id.as_deref(),
        "eventId",
        "Event ID",
        &mut violations,
    );
    let user_id = check_id(req.user_id.as_deref(), "userId", "User ID", &mut violations);

    match (event_id, user_id) {
        (Some(e), Some(u)) if violations.is_empty() => Ok((e, u)),
        _ => Err(DomainError::validation(violations)),
    }
}

fn check_id(
    raw: Option<&str>,
    field: &'static str,
    label: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<Uuid> {
    let raw = match raw {
        None => {
            violations.push(FieldViolation::new(field, format!("{label} is required")));
            return None;
        }
        Some("") => {
            violations.push(FieldViolation::new(field, format!("{label} cannot be empty")));
            return None;
        }
        Some(s) => s,
    };
    match parse_uuid_v4(raw) {
        Some(id) => Some(id),
        None => {
            violations.push(FieldViolation::new(field, format!("Invalid {field} format")));
            None
        }
    }
}

/// Accept only the 36-char hyphenated form of a version 4, RFC 4122 UUID.
/// Braced, URN and simple forms are rejected even though `Uuid` parses them.
pub(crate) fn parse_uuid_v4(s: &str) -> Option<Uuid> {
    if s.len() != 36 {
        return None;
    }
    let id = Uuid::try_parse(s).ok()?;
    (id.get_version_num() == 4 && id.get_variant() == Variant::RFC4122).then_some(id)
}
