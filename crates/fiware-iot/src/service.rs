use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::attribute::{Attribute, Command, Lazy, StaticAttribute};

/// A provisioning policy applied to a class of devices.
///
/// Devices sending measures to the same `resource` with the same `apikey`
/// belong to the same service group and inherit its mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceGroup {
    /// Southbound resource path, e.g. `/iot/d`.
    pub resource: String,
    /// API key shared by the devices of the group.
    pub apikey: String,
    /// Entity type of the devices of the group.
    #[serde(
        rename = "entity_type",
        alias = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_type: Option<String>,
    /// Trust token used to authenticate against the context broker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust: Option<String>,
    /// Context broker host.
    #[serde(rename = "cbHost", default, skip_serializing_if = "Option::is_none")]
    pub cb_host: Option<String>,
    /// Protocol tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Commands accepted by the devices of the group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    /// Active attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// Lazy attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lazy: Vec<Lazy>,
    /// Static attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_attributes: Vec<StaticAttribute>,
}

impl ServiceGroup {
    /// Creates a [`ServiceGroup`] for a resource path and an API key.
    #[must_use]
    #[inline]
    pub fn new(resource: impl Into<String>, apikey: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            apikey: apikey.into(),
            ..Self::default()
        }
    }

    /// Sets the entity type.
    #[must_use]
    #[inline]
    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    /// Sets the trust token.
    #[must_use]
    #[inline]
    pub fn trust(mut self, trust: impl Into<String>) -> Self {
        self.trust = Some(trust.into());
        self
    }

    /// Sets the context broker host.
    #[must_use]
    #[inline]
    pub fn cb_host(mut self, cb_host: impl Into<String>) -> Self {
        self.cb_host = Some(cb_host.into());
        self
    }

    /// Sets the protocol tag.
    #[must_use]
    #[inline]
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Appends a [`Command`].
    #[must_use]
    #[inline]
    pub fn command(mut self, command: Command) -> Self {
        self.commands.push(command);
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

    /// Appends a [`StaticAttribute`].
    #[must_use]
    #[inline]
    pub fn static_attribute(mut self, attribute: StaticAttribute) -> Self {
        self.static_attributes.push(attribute);
        self
    }
}

/// The envelope wrapping a list of [`ServiceGroup`]s on the wire.
///
/// `count` is only present in responses. Requests borrow the groups they
/// send, responses own the decoded ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceGroupList<'a> {
    /// Number of service groups known by the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Service groups.
    #[serde(default)]
    pub services: Cow<'a, [ServiceGroup]>,
}

impl<'a> ServiceGroupList<'a> {
    /// Wraps service groups into a request envelope.
    #[must_use]
    #[inline]
    pub fn new(services: impl Into<Cow<'a, [ServiceGroup]>>) -> Self {
        Self {
            count: None,
            services: services.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::attribute::{Attribute, Command, Lazy, Metadata};
    use crate::{deserialize, serialize};

    use super::{ServiceGroup, ServiceGroupList};

    pub(crate) fn service_group() -> ServiceGroup {
        ServiceGroup::new("/iot/d", "apiKey")
            .entity_type("ul")
            .trust("asdfj1123")
            .cb_host("http://orion:1026")
            .protocol("ul")
            .command(Command::new("Test", "int"))
            .attribute(
                Attribute::new("Temperature", "Number")
                    .metadata(Metadata::with_unit_code("Text", "CEL")),
            )
            .lazy(Lazy::new("lazyAttribute", "Text"))
    }

    #[test]
    fn service_group_wire_names() {
        assert_eq!(
            serialize(service_group()),
            json!({
                "resource": "/iot/d",
                "apikey": "apiKey",
                "entity_type": "ul",
                "trust": "asdfj1123",
                "cbHost": "http://orion:1026",
                "protocol": "ul",
                "commands": [{ "name": "Test", "type": "int" }],
                "attributes": [{
                    "name": "Temperature",
                    "type": "Number",
                    "metadata": { "unitCode": { "type": "Text", "value": "CEL" } },
                }],
                "lazy": [{ "name": "lazyAttribute", "type": "Text" }],
            })
        );
    }

    #[test]
    fn service_group_omits_unset_fields() {
        assert_eq!(
            serialize(ServiceGroup::new("/iot/d", "apiKey")),
            json!({
                "resource": "/iot/d",
                "apikey": "apiKey",
            })
        );
    }

    #[test]
    fn service_group_accepts_type_alias() {
        let group = deserialize::<ServiceGroup>(json!({
            "resource": "/iot/d",
            "apikey": "apiKey",
            "type": "ul",
        }));

        assert_eq!(group.entity_type.as_deref(), Some("ul"));
    }

    #[test]
    fn service_group_list_response() {
        let list = deserialize::<ServiceGroupList<'_>>(json!({
            "count": 1,
            "services": [serialize(service_group())],
        }));

        assert_eq!(list.count, Some(1));
        assert_eq!(list.services.into_owned(), vec![service_group()]);

        // Requests never carry a count.
        let groups = [service_group()];
        assert_eq!(
            serialize(ServiceGroupList::new(&groups[..])),
            json!({ "services": [serialize(service_group())] })
        );
        assert_eq!(
            serialize(ServiceGroupList::new(Vec::<ServiceGroup>::new())),
            json!({ "services": [] })
        );
    }
}
