use std::borrow::Cow;

use fiware_iot::response::ErrorResponse;

use crate::transport::TransportError;

/// Some headers required by the agent are missing from the request.
pub const MISSING_HEADERS: &str = "MISSING_HEADERS";
/// The request body or its parameters are malformed.
pub const WRONG_SYNTAX: &str = "WRONG_SYNTAX";
/// The requested device does not exist.
pub const DEVICE_NOT_FOUND: &str = "DEVICE_NOT_FOUND";
/// A device with the same identifier is already provisioned.
pub const DUPLICATE_DEVICE_ID: &str = "DUPLICATE_DEVICE_ID";
/// A success response whose body does not match the expected shape.
///
/// This name is never sent by a backend, it is assigned by the client.
pub const INVALID_RESPONSE_BODY: &str = "INVALID_RESPONSE_BODY";

/// A failure reported by the backend through a structured error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    /// Machine readable error code, e.g. [`MISSING_HEADERS`].
    pub name: String,
    /// Human readable error description.
    pub message: String,
    /// Status code of the response carrying the error.
    pub http_status: u16,
}

impl DomainError {
    /// Creates a [`DomainError`].
    #[must_use]
    pub fn new(name: impl Into<String>, message: impl Into<String>, http_status: u16) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            http_status,
        }
    }

    /// Checks whether the error carries the given name.
    #[must_use]
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }

    pub(crate) fn from_response(response: ErrorResponse<'_>, http_status: u16) -> Self {
        Self::new(response.name, response.message, http_status)
    }

    pub(crate) fn invalid_body(error: &serde_json::Error, http_status: u16) -> Self {
        Self::new(
            INVALID_RESPONSE_BODY,
            format!("Response body does not match the expected shape: {error}"),
            http_status,
        )
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.http_status, self.message)
    }
}

impl std::error::Error for DomainError {}

/// A non-success response without a structured error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    /// Status code of the response.
    pub status: u16,
    /// Response body, lossily decoded as text.
    pub body: String,
}

impl StatusError {
    pub(crate) fn new(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

impl std::fmt::Display for StatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unexpected response status {}", self.status)
    }
}

impl std::error::Error for StatusError {}

/// All possible error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The exchange never completed.
    Transport,
    /// The backend answered with a structured error.
    Domain,
    /// The backend answered with an unexpected status and no structured
    /// error.
    Status,
    /// The request could not be built.
    Request,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Transport => "Transport",
            Self::Domain => "Domain",
            Self::Status => "Status",
            Self::Request => "Request",
        })
    }
}

/// A client error.
#[derive(Debug)]
pub enum Error {
    /// The exchange never completed, e.g. DNS failure, refused connection
    /// or timeout.
    Transport(TransportError),
    /// The backend answered with a structured error, or with a success
    /// body which could not be decoded.
    Domain(DomainError),
    /// The backend answered with an unexpected status and no structured
    /// error body.
    Status(StatusError),
    /// The request could not be built, e.g. because of an invalid host or
    /// header value.
    Request(Cow<'static, str>),
}

impl Error {
    /// Returns the [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Domain(_) => ErrorKind::Domain,
            Self::Status(_) => ErrorKind::Status,
            Self::Request(_) => ErrorKind::Request,
        }
    }

    /// Returns the [`DomainError`], if any.
    #[must_use]
    pub const fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the status code of the response which caused the error, if
    /// a response has been received.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Domain(error) => Some(error.http_status),
            Self::Status(error) => Some(error.status),
            Self::Transport(_) | Self::Request(_) => None,
        }
    }

    pub(crate) fn request(description: impl Into<Cow<'static, str>>) -> Self {
        Self::Request(description.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{}: {e}", self.kind()),
            Self::Domain(e) => write!(f, "{}: {e}", self.kind()),
            Self::Status(e) => write!(f, "{}: {e}", self.kind()),
            Self::Request(description) => write!(f, "{}: {description}", self.kind()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Domain(e) => Some(e),
            Self::Status(e) => Some(e),
            Self::Request(_) => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<DomainError> for Error {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

/// A specialized [`Result`] type for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
