use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::contract::model::{EventSummary, Registration, RegistrationDetails, UserSummary};

/// Why an insert was rejected.
#[derive(Debug, Error)]
pub enum InsertError {
    /// The (event_id, user_id) unique index already holds this pair.
    #[error("registration already exists")]
    Duplicate,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait RegistrationsRepository: Send + Sync {
    async fn find_event_by_id(&self, id: Uuid) -> anyhow::Result<Option<EventSummary>>;

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserSummary>>;

    /// Existing registration for the pair, if any.
    async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Registration>>;

    /// Insert a fully-formed registration.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert_registration(&self, r: Registration) -> Result<(), InsertError>;

    /// Every registration joined with its event and user, ordered by
    /// `created_at` then `id`.
    async fn list_registrations_with_event_and_user(
        &self,
    ) -> anyhow::Result<Vec<RegistrationDetails>>;
}
