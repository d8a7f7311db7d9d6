//! Typed client for the beacon telemetry backend.
//!
//! # Overview
//! Wraps the three read-only beacon endpoints behind a transport client that
//! validates the backend's status envelope, surfaces one user-visible
//! notification per failure, and hands callers only the unwrapped payload.
//!
//! # Design
//! - `BeaconClient` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. It holds only configuration.
//! - `Transport` executes the round-trip; `ReqwestTransport` is the real one.
//! - `BeaconApi` composes client, transport, request interceptor and the
//!   notifying response interceptor into the endpoint functions. It is an
//!   ordinary value that callers construct and pass around; there is no
//!   process-wide instance.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod notify;
pub mod transport;
pub mod types;

pub use api::BeaconApi;
pub use client::BeaconClient;
pub use config::ClientConfig;
pub use error::{ApiError, FALLBACK_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use interceptor::{PassThrough, RequestInterceptor, ResponseInterceptor};
pub use notify::{Notifier, TracingNotifier};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{
    BeaconRecord, DailyBucket, DailyStats, Envelope, HourlyBucket, HourlyStats, Page, QueryParams,
};
