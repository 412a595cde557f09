use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::tenant::{DEFAULT_SERVICE_PATH, TenantContext};

/// The path where an `IoT-Manager` lists its protocols by default.
pub const DEFAULT_PROTOCOLS_PATH: &str = "/iot/protocols";

fn default_service_path() -> String {
    DEFAULT_SERVICE_PATH.into()
}

fn default_protocols_path() -> String {
    DEFAULT_PROTOCOLS_PATH.into()
}

/// Client configuration, usually deserialized from a configuration file.
///
/// Only `host` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service host, e.g. `http://iot-agent:4041`.
    pub host: String,
    /// Tenant name.
    #[serde(default)]
    pub service: String,
    /// Tenant sub-path.
    #[serde(default = "default_service_path")]
    pub service_path: String,
    /// Path where an `IoT-Manager` lists its protocols.
    #[serde(default = "default_protocols_path")]
    pub protocols_path: String,
    /// Timeout of a whole exchange, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Creates a [`ClientConfig`] for a host, with default values for all
    /// other fields.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            service: String::new(),
            service_path: default_service_path(),
            protocols_path: default_protocols_path(),
            timeout_secs: None,
        }
    }

    /// Sets the tenant.
    #[must_use]
    pub fn tenant(mut self, tenant: &TenantContext) -> Self {
        self.service = tenant.service().into();
        self.service_path = tenant.service_path().into();
        self
    }

    /// Sets the exchange timeout.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Returns the configured [`TenantContext`].
    #[must_use]
    pub fn tenant_context(&self) -> TenantContext {
        TenantContext::new(self.service.as_str()).with_service_path(self.service_path.as_str())
    }

    /// Returns the configured exchange timeout.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        }
    }
}
