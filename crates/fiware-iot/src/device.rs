use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, Command, Lazy, StaticAttribute};

/// A provisioned device.
///
/// Only `device_id` is mandatory, so the same structure describes a
/// partial update when the remaining fields are left unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier.
    pub device_id: String,
    /// Name of the entity representing the device on the context broker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    /// Type of the entity representing the device on the context broker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Protocol tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Transport used by the device, e.g. `HTTP` or `MQTT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    /// Time zone of the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Endpoint where commands are pushed, for devices in push mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Active attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// Lazy attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lazy: Vec<Lazy>,
    /// Commands accepted by the device.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    /// Static attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_attributes: Vec<StaticAttribute>,
}

impl Device {
    /// Creates a [`Device`] with the given identifier.
    #[must_use]
    #[inline]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            ..Self::default()
        }
    }

    /// Sets the entity name and type.
    #[must_use]
    #[inline]
    pub fn entity(mut self, name: impl Into<String>, kind: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self.entity_type = Some(kind.into());
        self
    }

    /// Sets the protocol tag.
    #[must_use]
    #[inline]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the transport.
    #[must_use]
    #[inline]
    pub fn transport(mut self, transport: impl Into<String>) -> Self {
        self.transport = Some(transport.into());
        self
    }

    /// Sets the time zone.
    #[must_use]
    #[inline]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the command endpoint.
    #[must_use]
    #[inline]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Appends an [`Attribute`].
    #[must_use]
    #[inline]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Appends a [`Lazy`] attribute.
    #[must_use]
    #[inline]
    pub fn lazy(mut self, lazy: Lazy) -> Self {
        self.lazy.push(lazy);
        self
    }

    /// Appends a [`Command`].
    #[must_use]
    #[inline]
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Appends a [`StaticAttribute`].
    #[must_use]
    #[inline]
    pub fn static_attribute(mut self, attribute: StaticAttribute) -> Self {
        self.static_attributes.push(attribute);
        self
    }
}

/// The envelope wrapping a list of [`Device`]s on the wire.
///
/// `count` is only present in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceList<'a> {
    /// Number of devices known by the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Devices.
    #[serde(default)]
    pub devices: Cow<'a, [Device]>,
}

impl<'a> DeviceList<'a> {
    /// Wraps devices into a request envelope.
    #[must_use]
    #[inline]
    pub fn new(devices: impl Into<Cow<'a, [Device]>>) -> Self {
        Self {
            count: None,
            devices: devices.into(),
        }
    }
}
