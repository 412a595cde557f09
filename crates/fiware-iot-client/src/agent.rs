use bytes::Bytes;

use fiware_iot::about::About;
use fiware_iot::device::{Device, DeviceList};
use fiware_iot::service::{ServiceGroup, ServiceGroupList};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};

use serde::Serialize;

use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::response::ResponseParser;
use crate::tenant::TenantContext;
use crate::transport::{HttpRequest, Transport, http_client};

const ABOUT_PATH: &str = "/iot/about";
const SERVICES_PATH: &str = "/iot/services";
const DEVICES_PATH: &str = "/iot/devices";

// Every agent operation succeeds with this status only.
const SUCCESS: StatusCode = StatusCode::OK;

fn encode<B: Serialize>(body: &B) -> Result<Bytes> {
    serde_json::to_vec(body)
        .map(Bytes::from)
        .map_err(|e| Error::request(format!("Impossible to encode the request body: {e}")))
}

/// A builder for an [`AgentClient`].
#[derive(Debug)]
pub struct AgentClientBuilder<T = reqwest::Client> {
    transport: T,
    host: Option<String>,
    tenant: Option<TenantContext>,
}

impl Default for AgentClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentClientBuilder {
    /// Creates an [`AgentClientBuilder`] using a default
    /// [`reqwest::Client`] as transport.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            transport: reqwest::Client::new(),
            host: None,
            tenant: None,
        }
    }
}

impl<T: Transport> AgentClientBuilder<T> {
    /// Sets the agent host, e.g. `http://iot-agent:4041`.
    ///
    /// A single trailing `/` is stripped.
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
        self.tenant = Some(tenant);
        self
    }

    /// Replaces the [`Transport`].
    #[must_use]
    #[inline]
    pub fn transport<U: Transport>(self, transport: U) -> AgentClientBuilder<U> {
        AgentClientBuilder {
            transport,
            host: self.host,
            tenant: self.tenant,
        }
    }

    /// Builds the [`AgentClient`].
    ///
    /// # Errors
    ///
    /// - The host or the tenant is missing
    /// - The host is not an absolute URL
    /// - A tenant value cannot be rendered as an HTTP header
    pub fn build(self) -> Result<AgentClient<T>> {
        let host = self
            .host
            .ok_or_else(|| Error::request("The agent host is missing"))?;
        let tenant = self
            .tenant
            .ok_or_else(|| Error::request("The agent tenant is missing"))?;

        let endpoint = Endpoint::new(host);
        endpoint.validate()?;

        let headers = tenant.headers()?;
        let mut json_headers = headers.clone();
        let _ = json_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(AgentClient {
            transport: self.transport,
            endpoint,
            tenant,
            headers,
            json_headers,
        })
    }
}

/// A client for an `IoT-Agent`.
///
/// It provisions and queries service groups and devices on behalf of a
/// single tenant. Every operation performs exactly one exchange, expects a
/// `200` status and is never retried:
///
/// - A structured error body is returned as a
///   [`DomainError`](crate::error::DomainError)
/// - A failure without a structured body is returned as a
///   [`StatusError`](crate::error::StatusError)
/// - An exchange which never completed is returned as a
///   [`TransportError`](crate::transport::TransportError)
#[derive(Debug, Clone)]
pub struct AgentClient<T = reqwest::Client> {
    transport: T,
    endpoint: Endpoint,
    tenant: TenantContext,
    headers: HeaderMap,
    json_headers: HeaderMap,
}

impl AgentClient {
    /// Creates an [`AgentClientBuilder`].
    #[must_use]
    #[inline]
    pub fn builder() -> AgentClientBuilder {
        AgentClientBuilder::new()
    }

    /// Creates an [`AgentClient`] from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// The same errors of [`AgentClientBuilder::build`], or a failure in
    /// initializing the HTTP client.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::builder()
            .transport(http_client(config.timeout())?)
            .host(config.host.as_str())
            .tenant(config.tenant_context())
            .build()
    }
}

impl<T: Transport> AgentClient<T> {
    /// Returns the agent [`Endpoint`].
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the [`TenantContext`].
    #[must_use]
    pub const fn tenant(&self) -> &TenantContext {
        &self.tenant
    }

    /// Retrieves the agent version information.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn about(&self) -> Result<About> {
        let url = self.endpoint.url(ABOUT_PATH)?;
        self.send(Method::GET, url, None).await?.json()
    }

    /// Creates service groups.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn create_services(&self, services: &[ServiceGroup]) -> Result<()> {
        let url = self.endpoint.url(SERVICES_PATH)?;
        let body = encode(&ServiceGroupList::new(services))?;
        self.send(Method::POST, url, Some(body)).await?.empty()
    }

    /// Updates service groups.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn update_services(&self, services: &[ServiceGroup]) -> Result<()> {
        let url = self.endpoint.url(SERVICES_PATH)?;
        let body = encode(&ServiceGroupList::new(services))?;
        self.send(Method::PUT, url, Some(body)).await?.empty()
    }

    /// Retrieves the service groups of the tenant.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn get_services(&self) -> Result<Vec<ServiceGroup>> {
        let url = self.endpoint.url(SERVICES_PATH)?;
        let list: ServiceGroupList<'_> = self.send(Method::GET, url, None).await?.json()?;
        Ok(list.services.into_owned())
    }

    /// Deletes the service group identified by a resource path and an API
    /// key.
    ///
    /// Both query parameters are always sent, so an empty value is
    /// rejected by the agent rather than by this client.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn delete_service(&self, resource: &str, apikey: &str) -> Result<()> {
        let url = self
            .endpoint
            .url_with_query(SERVICES_PATH, &[("apikey", apikey), ("resource", resource)])?;
        self.send(Method::DELETE, url, None).await?.empty()
    }

    /// Provisions devices.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn create_devices(&self, devices: &[Device]) -> Result<()> {
        let url = self.endpoint.url(DEVICES_PATH)?;
        let body = encode(&DeviceList::new(devices))?;
        self.send(Method::POST, url, Some(body)).await?.empty()
    }

    /// Retrieves the devices of the tenant.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn get_devices(&self) -> Result<Vec<Device>> {
        let url = self.endpoint.url(DEVICES_PATH)?;
        let list: DeviceList<'_> = self.send(Method::GET, url, None).await?.json()?;
        Ok(list.devices.into_owned())
    }

    /// Retrieves a single device.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn get_device(&self, device_id: &str) -> Result<Device> {
        let url = self.endpoint.resource_url(DEVICES_PATH, device_id)?;
        self.send(Method::GET, url, None).await?.json()
    }

    /// Updates a device.
    ///
    /// Only the fields set on `device` are sent, so a [`Device`] with just
    /// an identifier and the changed fields acts as a partial update.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn update_device(&self, device: &Device) -> Result<()> {
        let url = self.endpoint.url(DEVICES_PATH)?;
        let body = encode(device)?;
        self.send(Method::PUT, url, Some(body)).await?.empty()
    }

    /// Removes a device.
    ///
    /// # Errors
    ///
    /// Any [`Error`] described by the [`AgentClient`] documentation.
    pub async fn delete_device(&self, device_id: &str) -> Result<()> {
        let url = self.endpoint.resource_url(DEVICES_PATH, device_id)?;
        self.send(Method::DELETE, url, None).await?.empty()
    }

    async fn send(&self, method: Method, url: Url, body: Option<Bytes>) -> Result<ResponseParser> {
        let headers = if body.is_some() {
            self.json_headers.clone()
        } else {
            self.headers.clone()
        };

        debug!(
            "{method} {url} for service `{}` and service path `{}`",
            self.tenant.service(),
            self.tenant.service_path()
        );

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url,
                headers,
                body,
            })
            .await
            .map_err(|e| {
                error!("Request to the agent {} failed: {e}", self.endpoint.host());
                Error::Transport(e)
            })?;

        Ok(ResponseParser::new(response, SUCCESS))
    }
}
