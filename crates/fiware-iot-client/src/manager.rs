use fiware_iot::protocol::{ProtocolDescriptor, ProtocolList};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};

use tracing::{debug, error};

use crate::config::{ClientConfig, DEFAULT_PROTOCOLS_PATH};
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::response::ResponseParser;
use crate::tenant::TenantContext;
use crate::transport::{HttpRequest, Transport, http_client};

/// A builder for a [`ManagerClient`].
#[derive(Debug)]
pub struct ManagerClientBuilder<T = reqwest::Client> {
    transport: T,
    host: Option<String>,
    tenant: TenantContext,
    protocols_path: String,
}

impl Default for ManagerClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ManagerClientBuilder {
    /// Creates a [`ManagerClientBuilder`] using a default
    /// [`reqwest::Client`] as transport, the default [`TenantContext`] and
    /// the [`DEFAULT_PROTOCOLS_PATH`].
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            transport: reqwest::Client::new(),
            host: None,
            tenant: TenantContext::default(),
            protocols_path: DEFAULT_PROTOCOLS_PATH.into(),
        }
    }
}

impl<T: Transport> ManagerClientBuilder<T> {
    /// Sets the manager host, e.g. `http://iot-manager:8082`.
    #[must_use]
    #[inline]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the [`TenantContext`] scoping every request.
    #[must_use]
    #[inline]
    pub fn tenant(mut self, tenant: TenantContext) -> Self {
        self.tenant = tenant;
        self
    }

    /// Sets the path where the manager lists its protocols.
    #[must_use]
    #[inline]
    pub fn protocols_path(mut self, protocols_path: impl Into<String>) -> Self {
        self.protocols_path = protocols_path.into();
        self
    }

    /// Replaces the [`Transport`].
    #[must_use]
    #[inline]
    pub fn transport<U: Transport>(self, transport: U) -> ManagerClientBuilder<U> {
        ManagerClientBuilder {
            transport,
            host: self.host,
            tenant: self.tenant,
            protocols_path: self.protocols_path,
        }
    }

    /// Builds the [`ManagerClient`].
    ///
    /// # Errors
    ///
    /// - The host is missing
    /// - The host is not an absolute URL
    /// - A tenant value cannot be rendered as an HTTP header
    pub fn build(self) -> Result<ManagerClient<T>> {
        let host = self
            .host
            .ok_or_else(|| Error::request("The manager host is missing"))?;

        let endpoint = Endpoint::new(host);
        endpoint.validate()?;

        let mut headers = self.tenant.headers()?;
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(ManagerClient {
            transport: self.transport,
            endpoint,
            protocols_path: self.protocols_path,
            headers,
        })
    }
}

/// A client for an `IoT-Manager`.
///
/// The manager does not describe its failures with a structured body, so
/// any status other than `200` is returned as a
/// [`StatusError`](crate::error::StatusError).
#[derive(Debug, Clone)]
pub struct ManagerClient<T = reqwest::Client> {
    transport: T,
    endpoint: Endpoint,
    protocols_path: String,
    headers: HeaderMap,
}

impl ManagerClient {
    /// Creates a [`ManagerClientBuilder`].
    #[must_use]
    #[inline]
    pub fn builder() -> ManagerClientBuilder {
        ManagerClientBuilder::new()
    }

    /// Creates a [`ManagerClient`] from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// The same errors of [`ManagerClientBuilder::build`], or a failure in
    /// initializing the HTTP client.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder()
            .transport(http_client(config.timeout())?)
            .host(config.host.as_str())
            .tenant(config.tenant_context())
            .protocols_path(config.protocols_path.as_str())
            .build()
    }
}

impl<T: Transport> ManagerClient<T> {
    /// Returns the manager [`Endpoint`].
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the path where the manager lists its protocols.
    #[must_use]
    pub fn protocols_path(&self) -> &str {
        &self.protocols_path
    }

    /// Lists the protocols registered on the manager, in backend order.
    ///
    /// # Errors
    ///
    /// - A [`TransportError`](crate::transport::TransportError) when the
    ///   exchange never completed
    /// - A [`StatusError`](crate::error::StatusError) when the status is
    ///   not `200`
    /// - A [`DomainError`](crate::error::DomainError) when the body of a
    ///   `200` response does not have the expected shape
    pub async fn list_protocols(&self) -> Result<Vec<ProtocolDescriptor>> {
        let url = self.endpoint.url(&self.protocols_path)?;

        debug!("{} {url}", Method::GET);

        let response = self
            .transport
            .execute(HttpRequest {
                method: Method::GET,
                url,
                headers: self.headers.clone(),
                body: None,
            })
            .await
            .map_err(|e| {
                error!("Request to the manager {} failed: {e}", self.endpoint.host());
                Error::Transport(e)
            })?;

        let list: ProtocolList = ResponseParser::new(response, StatusCode::OK).json_or_status()?;
        Ok(list.protocols)
    }
}
