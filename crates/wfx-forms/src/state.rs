#![forbid(unsafe_code)]

//! Per-form submission state.
//!
//! ```text
//! Idle ──begin──▶ Submitting ──finish(Ok)──▶ Succeeded
//!  ▲                   │
//!  └──── retry ◀── Failed(err) ◀──finish(Err)
//! ```
//!
//! A second submit while `Submitting` is refused, which is what disables
//! the submit button.

use crate::client::{FormClient, SubmissionReceipt, SubmitError};
use crate::payload::FormPayload;
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Succeeded(SubmissionReceipt),
    Failed(SubmitError),
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Submitting`. Refused unless `Idle`.
    pub fn begin(&mut self) -> bool {
        if *self == Self::Idle {
            *self = Self::Submitting;
            true
        } else {
            false
        }
    }

    /// Record the outcome of the in-flight submission. Ignored unless
    /// `Submitting`.
    pub fn finish(&mut self, result: Result<SubmissionReceipt, SubmitError>) {
        if *self != Self::Submitting {
            return;
        }
        *self = match result {
            Ok(receipt) => Self::Succeeded(receipt),
            Err(err) => Self::Failed(err),
        };
    }

    /// Return to `Idle` from `Failed`, keeping the form contents.
    pub fn retry(&mut self) -> bool {
        if matches!(self, Self::Failed(_)) {
            *self = Self::Idle;
            true
        } else {
            false
        }
    }

    /// Return to `Idle` from any settled state (form reset).
    pub fn reset(&mut self) {
        if *self != Self::Submitting {
            *self = Self::Idle;
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        *self == Self::Submitting
    }

    #[must_use]
    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        match self {
            Self::Succeeded(receipt) => Some(receipt),
            _ => None,
        }
    }

    /// Message to render under the form, if any.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        self.error().map(SubmitError::user_message)
    }

    /// Run a full submission through `client`. Returns `false` without
    /// sending when a submission is already in flight or settled.
    pub fn submit<T: Transport, P: FormPayload>(
        &mut self,
        client: &mut FormClient<T>,
        payload: &P,
    ) -> bool {
        if !self.begin() {
            return false;
        }
        self.finish(client.submit(payload));
        true
    }
}
