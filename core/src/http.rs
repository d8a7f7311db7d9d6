//! HTTP exchange types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain owned data. `BeaconClient` builds
//! `HttpRequest` values and parses `HttpResponse` values; a `Transport`
//! performs the network round-trip in between. Keeping the exchange as data
//! lets the envelope handling be tested without a socket.

/// HTTP method for a request. The beacon backend only exposes reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// A completed HTTP exchange as plain data, handed to `BeaconClient::parse_*`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
