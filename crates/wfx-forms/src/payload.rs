#![forbid(unsafe_code)]

//! Request bodies and client-side validation.
//!
//! Field names go over the wire in camelCase. Optional fields that are
//! `None` are omitted from the JSON body.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kind::FormKind;

/// A payload failed client-side validation. Nothing was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or whitespace.
    MissingField(&'static str),
    /// The e-mail address is not plausible.
    InvalidEmail(String),
    /// A booking must be for at least one guest.
    InvalidGuests(u32),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::InvalidEmail(email) => write!(f, "invalid e-mail address: {email:?}"),
            Self::InvalidGuests(n) => write!(f, "invalid guest count: {n}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A body that can be posted to one of the form endpoints.
pub trait FormPayload: Serialize {
    const KIND: FormKind;

    /// Check required fields before anything is sent.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Loose plausibility check: one `@`, something before it, a dotted
/// domain after it, no whitespace.
#[must_use]
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn require_email(email: &str) -> Result<(), ValidationError> {
    require("email", email)?;
    if is_plausible_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_owned()))
    }
}

/// General enquiry from the contact section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
    /// Tour the enquiry is about, when sent from a tour page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_id: Option<String>,
}

impl FormPayload for ContactRequest {
    const KIND: FormKind = FormKind::Contact;

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("message", &self.message)
    }
}

/// Tour booking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub tour_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Requested departure date, `YYYY-MM-DD`.
    pub date: String,
    pub guests: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FormPayload for BookingRequest {
    const KIND: FormKind = FormKind::Booking;

    fn validate(&self) -> Result<(), ValidationError> {
        require("tourId", &self.tour_id)?;
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("date", &self.date)?;
        if self.guests == 0 {
            return Err(ValidationError::InvalidGuests(self.guests));
        }
        Ok(())
    }
}

/// Newsletter sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterRequest {
    pub email: String,
}

impl FormPayload for NewsletterRequest {
    const KIND: FormKind = FormKind::Newsletter;

    fn validate(&self) -> Result<(), ValidationError> {
        require_email(&self.email)
    }
}

/// Request for a downloadable document (brochure, itinerary).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRequest {
    pub name: String,
    pub email: String,
    pub document_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tour_id: Option<String>,
}

impl FormPayload for DocumentRequest {
    const KIND: FormKind = FormKind::DocumentRequest;

    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("documentType", &self.document_type)
    }
}
