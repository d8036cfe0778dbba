#![forbid(unsafe_code)]

//! The site's form endpoints.

use std::fmt;

/// Which endpoint a payload is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    Booking,
    Newsletter,
    DocumentRequest,
}

impl FormKind {
    pub const ALL: [Self; 4] = [
        Self::Contact,
        Self::Booking,
        Self::Newsletter,
        Self::DocumentRequest,
    ];

    /// Endpoint path, relative to the site origin.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Contact => "/api/contact",
            Self::Booking => "/api/booking",
            Self::Newsletter => "/api/newsletter",
            Self::DocumentRequest => "/api/document-request",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Booking => "booking",
            Self::Newsletter => "newsletter",
            Self::DocumentRequest => "document-request",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
