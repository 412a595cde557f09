use reqwest::Url;

use crate::error::{Error, Result};

/// The base address of a service, e.g. `https://iot-agent.example.org`.
///
/// A single trailing `/` is stripped at construction, so paths can be
/// appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base_host: String,
}

impl Endpoint {
    /// Creates an [`Endpoint`] from a host.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let mut base_host = host.into();
        if base_host.ends_with('/') {
            let _ = base_host.pop();
        }
        Self { base_host }
    }

    /// Returns the normalized host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.base_host
    }

    /// Checks whether the host is an absolute URL.
    ///
    /// # Errors
    ///
    /// An error is returned when the host cannot be parsed as an absolute
    /// URL.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_host)
            .map(|_| ())
            .map_err(|e| Error::request(format!("Invalid host `{}`: {e}", self.base_host)))
    }

    /// Builds the URL of a path on this endpoint.
    ///
    /// # Errors
    ///
    /// An error is returned when the host joined with the path is not a
    /// valid URL.
    pub fn url(&self, path: &str) -> Result<Url> {
        let url = format!("{}{path}", self.base_host);
        Url::parse(&url).map_err(|e| Error::request(format!("Invalid URL `{url}`: {e}")))
    }

    /// Builds the URL of a path on this endpoint with the given query
    /// parameters.
    ///
    /// Parameters are always sent, even when their value is empty.
    ///
    /// # Errors
    ///
    /// An error is returned when the host joined with the path is not a
    /// valid URL.
    pub fn url_with_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let url = format!("{}{path}", self.base_host);
        Url::parse_with_params(&url, query)
            .map_err(|e| Error::request(format!("Invalid URL `{url}`: {e}")))
    }

    /// Builds the URL of a resource identified by `id` below `path`.
    ///
    /// The identifier is percent-encoded as a single path segment.
    ///
    /// # Errors
    ///
    /// An error is returned when:
    ///
    /// - The identifier is empty, `.` or `..`, which would address the
    ///   collection or its parent rather than a resource
    /// - The host joined with the path is not a valid URL
    /// - The host cannot have path segments
    pub fn resource_url(&self, path: &str, id: &str) -> Result<Url> {
        if matches!(id, "" | "." | "..") {
            return Err(Error::request(format!(
                "Invalid resource identifier `{id}`"
            )));
        }
        let mut url = self.url(path)?;
        let _ = url
            .path_segments_mut()
            .map_err(|()| Error::request(format!("Host `{}` cannot be a base", self.base_host)))?
            .push(id);
        Ok(url)
    }
}
