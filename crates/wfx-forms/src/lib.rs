#![forbid(unsafe_code)]

//! Client side of the site's form endpoints.
//!
//! Page sections wrapped by the reveal and carousel primitives submit four
//! forms: contact, booking, newsletter, and document request. This crate
//! owns the part that runs in the browser: payload shapes, validation,
//! response interpretation, and the per-form state shown to the user.
//! The endpoints themselves are external.
//!
//! # Example
//!
//! ```
//! use wfx_forms::{FormClient, FormState, HttpResponse, NewsletterRequest, Transport, TransportError};
//!
//! struct Ok200;
//! impl Transport for Ok200 {
//!     fn post_json(&mut self, _path: &str, _body: &str) -> Result<HttpResponse, TransportError> {
//!         Ok(HttpResponse::new(200, r#"{"success":true}"#))
//!     }
//! }
//!
//! let mut client = FormClient::new(Ok200);
//! let mut state = FormState::new();
//! state.submit(&mut client, &NewsletterRequest { email: "ana@example.pt".into() });
//! assert!(state.receipt().is_some());
//! ```

pub mod client;
pub mod kind;
pub mod payload;
pub mod state;
pub mod transport;

pub use client::{FormClient, SubmissionReceipt, SubmitError};
pub use kind::FormKind;
pub use payload::{
    BookingRequest, ContactRequest, DocumentRequest, FormPayload, NewsletterRequest,
    ValidationError, is_plausible_email,
};
pub use state::FormState;
pub use transport::{HttpResponse, Transport, TransportError};
