#![forbid(unsafe_code)]

//! The HTTP seam.
//!
//! The crate never talks to the network itself. Hosts implement
//! [`Transport`] over `fetch`, a native HTTP client, or a test double.

use std::fmt;

/// Raw response from a form endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No connectivity.
    Offline,
    Timeout,
    /// Any other host-level failure.
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("network unavailable"),
            Self::Timeout => f.write_str("request timed out"),
            Self::Other(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Posts a JSON body to a path on the site origin.
pub trait Transport {
    fn post_json(&mut self, path: &str, body: &str) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn post_json(&mut self, path: &str, body: &str) -> Result<HttpResponse, TransportError> {
        (**self).post_json(path, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_json(&mut self, path: &str, body: &str) -> Result<HttpResponse, TransportError> {
        (**self).post_json(path, body)
    }
}
