//! Caller identity resolution
//!
//! Token verification happens upstream: an authentication layer that has
//! checked the bearer token stores its claims in the request extensions as
//! [`VerifiedClaims`]. Resolvers only read what is already there; they take
//! the request parts explicitly and keep no global state.
//!
//! Identity is informational. No handler uses it to filter or authorize.

use anyhow::Result;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::Serialize;
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::sync::Arc;

/// A verified caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// `sub` claim
    pub subject: String,
    /// `name` claim, if the token carries one
    pub name: Option<String>,
}

/// Claims of a bearer token that has already been verified
#[derive(Debug, Clone, Default)]
pub struct VerifiedClaims(pub Map<String, Value>);

impl VerifiedClaims {
    /// String value of a claim, if present and a string
    pub fn claim_as_str(&self, claim: &str) -> Option<&str> {
        self.0.get(claim).and_then(Value::as_str)
    }
}

impl From<Value> for VerifiedClaims {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => VerifiedClaims(map),
            _ => VerifiedClaims::default(),
        }
    }
}

/// Trait for identity resolvers
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve the caller of the request described by `parts`
    async fn resolve(&self, parts: &Parts) -> Result<Option<Identity>>;
}

/// Resolver that never yields an identity
pub struct NoIdentityResolver;

#[async_trait]
impl IdentityResolver for NoIdentityResolver {
    async fn resolve(&self, _parts: &Parts) -> Result<Option<Identity>> {
        Ok(None)
    }
}

/// Resolver reading `sub` and `name` from [`VerifiedClaims`]
pub struct ClaimsIdentityResolver;

#[async_trait]
impl IdentityResolver for ClaimsIdentityResolver {
    async fn resolve(&self, parts: &Parts) -> Result<Option<Identity>> {
        let Some(claims) = parts.extensions.get::<VerifiedClaims>() else {
            return Ok(None);
        };

        Ok(claims.claim_as_str("sub").map(|subject| Identity {
            subject: subject.to_string(),
            name: claims.claim_as_str("name").map(str::to_string),
        }))
    }
}

/// Optional caller identity, extracted with the resolver held in state
///
/// Resolver failures are logged and yield `None`; they never reject the request.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub Option<Identity>);

/// Access to the configured resolver from router state
pub trait HasIdentityResolver {
    fn identity_resolver(&self) -> Arc<dyn IdentityResolver>;
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: HasIdentityResolver + Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let resolver = state.identity_resolver();
        match resolver.resolve(parts).await {
            Ok(identity) => Ok(CallerIdentity(identity)),
            Err(e) => {
                tracing::warn!(error = %e, "Identity resolution failed, continuing anonymously");
                Ok(CallerIdentity(None))
            }
        }
    }
}
