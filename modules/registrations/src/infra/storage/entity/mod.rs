//! SeaORM entities. `users` and `events` are owned by other services and only read here.

pub mod event;
pub mod registration;
pub mod user;
