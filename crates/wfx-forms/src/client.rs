#![forbid(unsafe_code)]

//! Submitting payloads and interpreting responses.
//!
//! Endpoints answer `{ "success": true, ... }` or
//! `{ "success": false, "error": "..." }`. Every failure is logged at
//! `warn` and returned to the caller; none is swallowed.
//!
//! # Failure Modes
//!
//! | Condition | Error | Retryable |
//! |-----------|-------|-----------|
//! | Payload fails `validate` | `Validation` | no |
//! | Transport failed | `Network` | yes |
//! | Non-2xx status | `Http` | 408, 429, 5xx |
//! | `success: false` | `Rejected` | no |
//! | Body is not the expected JSON | `MalformedResponse` | yes |

use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::kind::FormKind;
use crate::payload::{FormPayload, ValidationError};
use crate::transport::{Transport, TransportError};

/// Why a submission did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    Validation(ValidationError),
    Network(TransportError),
    Http { status: u16, message: Option<String> },
    /// The endpoint answered `success: false`.
    Rejected(String),
    MalformedResponse(String),
    /// The payload could not be encoded as JSON.
    Encode(String),
}

impl SubmitError {
    /// Whether sending the same payload again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::MalformedResponse(_) => true,
            Self::Http { status, .. } => matches!(status, 408 | 429 | 500..=599),
            Self::Validation(_) | Self::Rejected(_) | Self::Encode(_) => false,
        }
    }

    /// Text to show next to the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(ValidationError::MissingField(field)) => {
                format!("Please fill in the {field} field.")
            }
            Self::Validation(ValidationError::InvalidEmail(_)) => {
                "Please enter a valid e-mail address.".to_owned()
            }
            Self::Validation(ValidationError::InvalidGuests(_)) => {
                "Please book for at least one guest.".to_owned()
            }
            Self::Network(_) => {
                "We couldn't reach our server. Check your connection and try again.".to_owned()
            }
            Self::Rejected(reason) if !reason.is_empty() => reason.clone(),
            Self::Http {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ if self.is_retryable() => {
                "Something went wrong on our side. Please try again in a moment.".to_owned()
            }
            _ => "We couldn't process your request.".to_owned(),
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation failed: {e}"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::Http {
                status,
                message: Some(message),
            } => write!(f, "HTTP {status}: {message}"),
            Self::Http { status, .. } => write!(f, "HTTP {status}"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
            Self::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
            Self::Encode(detail) => write!(f, "could not encode payload: {detail}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for SubmitError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<TransportError> for SubmitError {
    fn from(e: TransportError) -> Self {
        Self::Network(e)
    }
}

/// A successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub kind: FormKind,
    /// Server-assigned record id, when the endpoint returns one.
    pub id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
}

impl ResponseBody {
    fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Submits form payloads over a [`Transport`].
#[derive(Debug)]
pub struct FormClient<T> {
    transport: T,
}

impl<T: Transport> FormClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Validate, post, and interpret the response.
    pub fn submit<P: FormPayload>(
        &mut self,
        payload: &P,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let kind = P::KIND;
        let result = self.send(payload);
        match &result {
            Ok(receipt) => debug!(form = kind.as_str(), id = ?receipt.id, "form submitted"),
            Err(err) => warn!(
                form = kind.as_str(),
                error = %err,
                retryable = err.is_retryable(),
                "form submission failed"
            ),
        }
        result
    }

    fn send<P: FormPayload>(&mut self, payload: &P) -> Result<SubmissionReceipt, SubmitError> {
        payload.validate()?;
        let body =
            serde_json::to_string(payload).map_err(|e| SubmitError::Encode(e.to_string()))?;
        let response = self.transport.post_json(P::KIND.path(), &body)?;
        let parsed = serde_json::from_str::<ResponseBody>(&response.body);

        if !response.is_success() {
            let message = parsed.ok().and_then(|b| b.error.or(b.message));
            return Err(SubmitError::Http {
                status: response.status,
                message,
            });
        }

        let body = parsed.map_err(|e| SubmitError::MalformedResponse(e.to_string()))?;
        if !body.success {
            return Err(SubmitError::Rejected(
                body.error.or(body.message).unwrap_or_default(),
            ));
        }
        Ok(SubmissionReceipt {
            kind: P::KIND,
            id: body.id_string(),
            message: body.message,
        })
    }
}
