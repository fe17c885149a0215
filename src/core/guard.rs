//! Request guards run ahead of the generated handler
//!
//! Guards are the middleware position of a registered route: they run in
//! registration order before any query work, and the first rejection
//! becomes the response. Typical guards check a session or credential and
//! reject with [`RequestError::Forbidden`](crate::core::error::RequestError).

use crate::core::error::ListError;
use async_trait::async_trait;
use axum::http::request::Parts;

/// An ordered pre-handler check for a registered route.
#[async_trait]
pub trait RouteGuard: Send + Sync {
    /// Inspect the request head; return an error to short-circuit the
    /// request with that error's response.
    async fn check(&self, request: &Parts) -> Result<(), ListError>;
}

/// Adapter turning a plain closure into a [`RouteGuard`].
///
/// # Example
/// ```rust,ignore
/// let require_session = GuardFn::new(|request: &Parts| {
///     if request.headers.contains_key("authorization") {
///         Ok(())
///     } else {
///         Err(RequestError::Forbidden {
///             message: "missing credential".to_string(),
///         }
///         .into())
///     }
/// });
/// ```
pub struct GuardFn<F> {
    check: F,
}

impl<F> GuardFn<F>
where
    F: Fn(&Parts) -> Result<(), ListError> + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<F> RouteGuard for GuardFn<F>
where
    F: Fn(&Parts) -> Result<(), ListError> + Send + Sync,
{
    async fn check(&self, request: &Parts) -> Result<(), ListError> {
        (self.check)(request)
    }
}
