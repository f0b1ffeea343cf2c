//! # ModKit - building blocks shared by EventHub modules
//!
//! - [`contracts`]: lifecycle traits a module implements (`Module`, `DbModule`, `RestfulModule`)
//! - [`context`]: the per-module context handed to those hooks
//! - [`api::problem`]: RFC 9457 Problem Details responses
//! - [`api::auth`]: bearer-token caller identification
//! - [`api::request_id`]: request-id propagation and the per-request trace span

pub mod api;
pub mod context;
pub mod contracts;

pub use api::auth::{Caller, StaticTokenAuth};
pub use api::problem::{Problem, ProblemResponse, ValidationError};
pub use context::{ConfigProvider, ModuleCtx, ModuleCtxBuilder};
pub use contracts::{DbModule, Module, RestfulModule};
