use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{Error, Result};

/// Header carrying the tenant name.
pub const FIWARE_SERVICE: &str = "fiware-service";

/// Header carrying the tenant sub-path.
///
/// Header names are case-insensitive, the canonical spelling is
/// `fiware-servicePath`.
pub const FIWARE_SERVICE_PATH: &str = "fiware-servicepath";

/// The service path used when none is given.
pub const DEFAULT_SERVICE_PATH: &str = "/";

/// The tenant scoping every request of a client.
///
/// A tenant is identified by a service name and a service path, rendered
/// verbatim into the `fiware-service` and `fiware-servicePath` headers.
/// Their shape is not validated here, malformed values are rejected by
/// the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    service: String,
    service_path: String,
}

impl Default for TenantContext {
    fn default() -> Self {
        Self::new("")
    }
}

impl TenantContext {
    /// Creates a [`TenantContext`] for a service, using the
    /// [`DEFAULT_SERVICE_PATH`].
    #[must_use]
    #[inline]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            service_path: DEFAULT_SERVICE_PATH.into(),
        }
    }

    /// Sets the service path.
    ///
    /// An empty path falls back to the [`DEFAULT_SERVICE_PATH`].
    #[must_use]
    #[inline]
    pub fn with_service_path(mut self, service_path: impl Into<String>) -> Self {
        let service_path = service_path.into();
        self.service_path = if service_path.is_empty() {
            DEFAULT_SERVICE_PATH.into()
        } else {
            service_path
        };
        self
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the service path.
    #[must_use]
    pub fn service_path(&self) -> &str {
        &self.service_path
    }

    /// Renders the tenant headers.
    ///
    /// # Errors
    ///
    /// Values containing bytes which cannot appear in an HTTP header, such
    /// as control characters, are refused.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(2);
        let _ = headers.insert(
            HeaderName::from_static(FIWARE_SERVICE),
            header_value(FIWARE_SERVICE, &self.service)?,
        );
        let _ = headers.insert(
            HeaderName::from_static(FIWARE_SERVICE_PATH),
            header_value(FIWARE_SERVICE_PATH, &self.service_path)?,
        );
        Ok(headers)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::request(format!("Invalid `{name}` header value `{value}`: {e}")))
}
