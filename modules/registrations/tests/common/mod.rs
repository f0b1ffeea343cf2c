//! Shared fixtures: a migrated in-memory SQLite database and seed helpers.
//!
//! `users` and `events` are owned by other services, so tests insert rows
//! through the entities directly.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use modkit_db::{ConnectOpts, DbHandle};
use registrations::domain::service::Service;
use registrations::infra::storage::{
    entity::{event, user},
    migrations::Migrator,
    sea_orm_repo::SeaOrmRegistrationsRepository,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

/// Fresh in-memory database with migrations applied.
pub async fn test_db() -> DbHandle {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .expect("Failed to connect to test database");
    Migrator::up(&db.sea(), None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn service_for(conn: DatabaseConnection) -> Arc<Service> {
    Arc::new(Service::new(Arc::new(SeaOrmRegistrationsRepository::new(
        conn,
    ))))
}

pub async fn seed_user(conn: &DatabaseConnection, username: &str, role: user::Role) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();
    user::ActiveModel {
        id: Set(id),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        role: Set(role),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .expect("seed user");
    id
}

pub async fn seed_event(conn: &DatabaseConnection, organizer_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    let now = Utc::now();
    event::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        description: Set(Some(format!("{name} description"))),
        date: Set(Utc.with_ymd_and_hms(2030, 5, 17, 18, 0, 0).unwrap()),
        location: Set("Main Hall".to_string()),
        organizer_id: Set(organizer_id),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .expect("seed event");
    id
}

/// Organizer + event + attendee; returns `(event_id, user_id)`.
pub async fn seed_event_and_attendee(conn: &DatabaseConnection) -> (Uuid, Uuid) {
    let organizer = seed_user(conn, "organizer", user::Role::Organizer).await;
    let event_id = seed_event(conn, organizer, "RustConf").await;
    let user_id = seed_user(conn, "alice", user::Role::Attendee).await;
    (event_id, user_id)
}
