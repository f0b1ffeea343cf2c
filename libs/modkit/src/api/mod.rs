pub mod auth;
pub mod problem;
pub mod request_id;
