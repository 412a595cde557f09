use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// The body an `IoT-Agent` returns alongside a non-success status.
///
/// `name` is a machine readable code such as `MISSING_HEADERS`, while
/// `message` is a human readable description of the failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse<'a> {
    /// Machine readable error code.
    pub name: Cow<'a, str>,
    /// Human readable error description.
    pub message: Cow<'a, str>,
}

impl<'a> ErrorResponse<'a> {
    /// Generates an [`ErrorResponse`] from an error code and a description.
    #[must_use]
    #[inline]
    pub fn new(name: &'a str, message: &'a str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
        }
    }
}
