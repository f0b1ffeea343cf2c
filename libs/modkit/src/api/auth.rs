//! Bearer-token caller identification.
//!
//! Tokens are opaque strings mapped to a [`Caller`] up front; how they are
//! issued is outside this crate. [`require_caller`] rejects requests without a
//! known token and attaches the caller to request extensions.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::problem::{Problem, ProblemResponse};

/// Who is making the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub user_id: String,
    pub role: String,
}

/// Fixed token → caller table.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, Caller>,
}

impl StaticTokenAuth {
    pub fn new<I>(grants: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, Caller)>,
    {
        let mut tokens = HashMap::new();
        for (token, caller) in grants {
            if token.trim().is_empty() {
                anyhow::bail!("empty auth token for user '{}'", caller.user_id);
            }
            if caller.user_id.trim().is_empty() || caller.role.trim().is_empty() {
                anyhow::bail!("auth token grants need both user_id and role");
            }
            tokens.insert(token, caller);
        }
        Ok(Self { tokens })
    }

    pub fn authenticate(&self, token: &str) -> Option<&Caller> {
        self.tokens.get(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn bearer_token<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn unauthorized(detail: &str, instance: &str) -> Response {
    let problem = Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", detail)
        .with_code("UNAUTHENTICATED")
        .with_instance(instance);
    let mut resp = ProblemResponse(problem).into_response();
    resp.headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    resp
}

/// Middleware for `from_fn_with_state`: 401 unless the bearer token is known.
pub async fn require_caller(
    State(auth): State<Arc<StaticTokenAuth>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let caller = match bearer_token(&req) {
        None => return unauthorized("Missing bearer token", req.uri().path()),
        Some(token) => match auth.authenticate(token) {
            Some(caller) => caller.clone(),
            None => {
                debug!("Rejected unknown bearer token");
                return unauthorized("Unknown bearer token", req.uri().path());
            }
        },
    };

    debug!(user_id = %caller.user_id, role = %caller.role, "Caller authenticated");
    req.extensions_mut().insert(caller);
    next.run(req).await
}
