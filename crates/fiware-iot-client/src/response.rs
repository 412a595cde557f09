use fiware_iot::response::ErrorResponse;

use reqwest::StatusCode;

use serde::de::DeserializeOwned;

use tracing::warn;

use crate::error::{DomainError, Error, Result, StatusError};
use crate::transport::HttpResponse;

/// A parser which interprets a [`HttpResponse`] against the single status
/// code an operation expects on success.
///
/// The body is decoded exactly once: into the success type when the status
/// matches, into an error otherwise.
#[derive(Debug)]
pub struct ResponseParser {
    response: HttpResponse,
    expected: StatusCode,
}

impl ResponseParser {
    /// Creates a [`ResponseParser`] expecting the given success status.
    #[must_use]
    pub const fn new(response: HttpResponse, expected: StatusCode) -> Self {
        Self { response, expected }
    }

    /// Decodes a JSON success body.
    ///
    /// # Errors
    ///
    /// - A [`DomainError`] when the status is not the expected one and the
    ///   body is a structured error
    /// - A [`StatusError`] when the status is not the expected one and the
    ///   body is not a structured error
    /// - A [`DomainError`] named
    ///   [`INVALID_RESPONSE_BODY`](crate::error::INVALID_RESPONSE_BODY) when
    ///   the status matches but the body does not have the expected shape
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        if self.response.status != self.expected {
            return Err(self.failure());
        }
        self.decode_success()
    }

    /// Discards the body of a success response.
    ///
    /// # Errors
    ///
    /// The same failures of [`Self::json`] when the status is not the
    /// expected one.
    pub fn empty(self) -> Result<()> {
        if self.response.status != self.expected {
            return Err(self.failure());
        }
        Ok(())
    }

    /// Decodes a JSON success body, without interpreting failure bodies.
    ///
    /// # Errors
    ///
    /// - A [`StatusError`] when the status is not the expected one
    /// - A [`DomainError`] named
    ///   [`INVALID_RESPONSE_BODY`](crate::error::INVALID_RESPONSE_BODY) when
    ///   the status matches but the body does not have the expected shape
    pub fn json_or_status<T: DeserializeOwned>(self) -> Result<T> {
        if self.response.status != self.expected {
            let HttpResponse { status, body } = self.response;
            warn!("Unexpected response status {status}");
            return Err(Error::Status(StatusError::new(status.as_u16(), &body)));
        }
        self.decode_success()
    }

    fn decode_success<T: DeserializeOwned>(self) -> Result<T> {
        let status = self.response.status;
        serde_json::from_slice(&self.response.body).map_err(|e| {
            warn!("Discard response body with status {status}: {e}");
            Error::Domain(DomainError::invalid_body(&e, status.as_u16()))
        })
    }

    fn failure(self) -> Error {
        let HttpResponse { status, body } = self.response;
        match serde_json::from_slice::<ErrorResponse<'_>>(&body) {
            Ok(response) => {
                let error = DomainError::from_response(response, status.as_u16());
                warn!("Backend error: {error}");
                Error::Domain(error)
            }
            Err(_) => {
                warn!("Unexpected response status {status} without an error body");
                Error::Status(StatusError::new(status.as_u16(), &body))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use reqwest::StatusCode;

    use serde_json::{Value, json};

    use crate::error::{DomainError, Error, INVALID_RESPONSE_BODY, MISSING_HEADERS};
    use crate::transport::HttpResponse;

    use super::ResponseParser;

    fn parser(status: u16, body: &'static [u8]) -> ResponseParser {
        ResponseParser::new(
            HttpResponse {
                status: StatusCode::from_u16(status).unwrap(),
                body: Bytes::from_static(body),
            },
            StatusCode::OK,
        )
    }

    #[test]
    fn success_body() {
        assert_eq!(
            parser(200, br#"{"count": 0}"#).json::<Value>().unwrap(),
            json!({"count": 0})
        );
        assert!(parser(200, b"").empty().is_ok());
    }

    #[test]
    fn structured_error() {
        let body = br#"{"name": "MISSING_HEADERS", "message": "Some headers were missing"}"#;

        for result in [
            parser(400, body).json::<Value>().map(|_| ()),
            parser(400, body).empty(),
        ] {
            let Err(Error::Domain(error)) = result else {
                panic!("Expected a domain error");
            };
            assert_eq!(
                error,
                DomainError::new(MISSING_HEADERS, "Some headers were missing", 400)
            );
        }
    }

    #[test]
    fn other_success_status_is_a_failure() {
        let body = br#"{"name": "DUPLICATE_GROUP", "message": "Group already exists"}"#;

        let Err(Error::Domain(error)) = parser(201, body).empty() else {
            panic!("Expected a domain error");
        };
        assert_eq!(error.http_status, 201);
    }

    #[test]
    fn unstructured_error() {
        let Err(Error::Status(error)) = parser(502, b"<html>Bad Gateway</html>").empty() else {
            panic!("Expected a status error");
        };
        assert_eq!(error.status, 502);
        assert_eq!(error.body, "<html>Bad Gateway</html>");
    }

    #[test]
    fn invalid_success_body() {
        let Err(Error::Domain(error)) = parser(200, b"not json").json::<Value>() else {
            panic!("Expected a domain error");
        };
        assert_eq!(error.name, INVALID_RESPONSE_BODY);
        assert_eq!(error.http_status, 200);
    }

    #[test]
    fn status_only_failure() {
        let body = br#"{"name": "MISSING_HEADERS", "message": "Some headers were missing"}"#;

        let Err(Error::Status(error)) = parser(400, body).json_or_status::<Value>() else {
            panic!("Expected a status error");
        };
        assert_eq!(error.status, 400);
    }
}
