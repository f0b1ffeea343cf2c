//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` **or** a transactional connection.

use anyhow::{anyhow, Context};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::contract::model::{EventSummary, Registration, RegistrationDetails, UserSummary};
use crate::domain::repo::{InsertError, RegistrationsRepository};
use crate::infra::storage::entity::{event, registration, user};
use crate::infra::storage::mapper;

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmRegistrationsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmRegistrationsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> RegistrationsRepository for SeaOrmRegistrationsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_event_by_id(&self, id: Uuid) -> anyhow::Result<Option<EventSummary>> {
        let found = event::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_event_by_id failed")?;
        Ok(found.map(mapper::event_to_summary))
    }

    async fn find_user_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserSummary>> {
        let found = user::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_user_by_id failed")?;
        Ok(found.map(mapper::user_to_summary))
    }

    async fn find_registration(
        &self,
        event_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Registration>> {
        let found = registration::Entity::find()
            .filter(registration::Column::EventId.eq(event_id))
            .filter(registration::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("find_registration failed")?;
        Ok(found.map(mapper::registration_to_contract))
    }

    async fn insert_registration(&self, r: Registration) -> Result<(), InsertError> {
        let m = registration::ActiveModel {
            id: Set(r.id),
            event_id: Set(r.event_id),
            user_id: Set(r.user_id),
            created_at: Set(r.created_at),
            updated_at: Set(r.updated_at),
        };
        match m.insert(&self.conn).await {
            Ok(_) => Ok(()),
            Err(e) if modkit_db::is_unique_violation(&e) => Err(InsertError::Duplicate),
            Err(e) => Err(InsertError::Other(
                anyhow::Error::new(e).context("insert_registration failed"),
            )),
        }
    }

    async fn list_registrations_with_event_and_user(
        &self,
    ) -> anyhow::Result<Vec<RegistrationDetails>> {
        let rows = registration::Entity::find()
            .order_by_asc(registration::Column::CreatedAt)
            .order_by_asc(registration::Column::Id)
            .all(&self.conn)
            .await
            .context("list registrations failed")?;

        let events = rows
            .load_one(event::Entity, &self.conn)
            .await
            .context("load events failed")?;
        let users = rows
            .load_one(user::Entity, &self.conn)
            .await
            .context("load users failed")?;

        rows.into_iter()
            .zip(events)
            .zip(users)
            .map(|((r, e), u)| {
                let e = e.ok_or_else(|| anyhow!("registration {} references a missing event", r.id))?;
                let u = u.ok_or_else(|| anyhow!("registration {} references a missing user", r.id))?;
                Ok(mapper::details(r, e, u))
            })
            .collect()
    }
}
