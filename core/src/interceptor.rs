//! Request and response hooks around every endpoint call.
//!
//! # Design
//! The request side is an extension point that rewrites an outgoing
//! `HttpRequest`; the default leaves it untouched. The response side is
//! fixed: it funnels every failure (transport, envelope or decoding) through
//! the `Notifier` exactly once and passes successes through silently.

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::notify::Notifier;
use crate::transport::TransportError;

pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: HttpRequest) -> Result<HttpRequest, ApiError> {
        Ok(request)
    }
}

/// Forwards requests unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RequestInterceptor for PassThrough {}

#[derive(Debug, Clone)]
pub struct ResponseInterceptor<N> {
    notifier: N,
}

impl<N: Notifier> ResponseInterceptor<N> {
    pub fn new(notifier: N) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run `parse` on a completed exchange, notifying once on any failure.
    pub fn on_response<D>(
        &self,
        outcome: Result<HttpResponse, TransportError>,
        parse: impl FnOnce(HttpResponse) -> Result<D, ApiError>,
    ) -> Result<D, ApiError> {
        let result = outcome.map_err(ApiError::from).and_then(parse);
        if let Err(err) = &result {
            self.fail(err);
        }
        result
    }

    /// Report a failure that happened before any response existed.
    pub fn fail(&self, err: &ApiError) {
        warn!(error = %err, status = ?err.status(), "beacon request failed");
        self.notifier.error(err.message());
    }
}
