use indexmap::IndexMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The metadata name used to express a unit of measurement.
pub const UNIT_CODE: &str = "unitCode";

/// A single metadata entry attached to an [`Attribute`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Metadata type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Metadata value.
    pub value: Value,
}

impl MetadataEntry {
    /// Creates a [`MetadataEntry`].
    #[must_use]
    #[inline]
    pub fn new(kind: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Attribute metadata, indexed by metadata name.
///
/// Entries keep the order in which they were inserted or decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetadataEntry>);

impl Metadata {
    /// Creates an empty [`Metadata`].
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Creates a [`Metadata`] containing only a `unitCode` entry.
    #[must_use]
    #[inline]
    pub fn with_unit_code(kind: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().entry(UNIT_CODE, MetadataEntry::new(kind, value))
    }

    /// Adds a [`MetadataEntry`], replacing any entry with the same name.
    #[must_use]
    #[inline]
    pub fn entry(mut self, name: impl Into<String>, entry: MetadataEntry) -> Self {
        let _ = self.0.insert(name.into(), entry);
        self
    }

    /// Returns the [`MetadataEntry`] with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MetadataEntry> {
        self.0.get(name)
    }

    /// Returns the `unitCode` entry, if any.
    #[must_use]
    pub fn unit_code(&self) -> Option<&MetadataEntry> {
        self.get(UNIT_CODE)
    }

    /// Checks whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An active attribute, that is a measure sent by a device.
///
/// `object_id` is the name the device uses on the southbound side, while
/// `name` is the attribute name on the context broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Device-side identifier of the measure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Attribute name.
    pub name: String,
    /// Attribute type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Attribute metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Attribute {
    /// Creates an [`Attribute`] with a name and a type.
    #[must_use]
    #[inline]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            object_id: None,
            name: name.into(),
            kind: kind.into(),
            metadata: None,
        }
    }

    /// Sets the device-side identifier of the measure.
    #[must_use]
    #[inline]
    pub fn object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// Sets the attribute [`Metadata`].
    #[must_use]
    #[inline]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A lazy attribute, whose value is requested from the device on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lazy {
    /// Attribute name.
    pub name: String,
    /// Attribute type.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Lazy {
    /// Creates a [`Lazy`] attribute.
    #[must_use]
    #[inline]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A command a device accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command name.
    pub name: String,
    /// Command type.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Command {
    /// Creates a [`Command`].
    #[must_use]
    #[inline]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// An attribute with a fixed value, added to every entity update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticAttribute {
    /// Attribute name.
    pub name: String,
    /// Attribute type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Attribute value.
    pub value: Value,
}

impl StaticAttribute {
    /// Creates a [`StaticAttribute`].
    #[must_use]
    #[inline]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{deserialize, serialize};

    use super::{Attribute, Metadata, MetadataEntry, StaticAttribute};

    #[test]
    fn attribute_without_optional_fields() {
        assert_eq!(
            serialize(Attribute::new("temperature", "Number")),
            json!({
                "name": "temperature",
                "type": "Number",
            })
        );
    }

    #[test]
    fn attribute_with_unit_code() {
        let attribute = Attribute::new("temperature", "Number")
            .object_id("t")
            .metadata(Metadata::with_unit_code("Text", "CEL"));

        let value = json!({
            "object_id": "t",
            "name": "temperature",
            "type": "Number",
            "metadata": {
                "unitCode": {
                    "type": "Text",
                    "value": "CEL",
                }
            }
        });

        assert_eq!(serialize(&attribute), value);

        let attribute = deserialize::<Attribute>(value);
        assert_eq!(
            attribute.metadata.as_ref().and_then(Metadata::unit_code),
            Some(&MetadataEntry::new("Text", "CEL"))
        );
    }

    #[test]
    fn metadata_keeps_unknown_entries() {
        let metadata = deserialize::<Metadata>(json!({
            "unitCode": { "type": "Text", "value": "CEL" },
            "accuracy": { "type": "Number", "value": 0.5 },
        }));

        assert_eq!(
            metadata.get("accuracy"),
            Some(&MetadataEntry::new("Number", 0.5))
        );
        assert!(!metadata.is_empty());
    }

    #[test]
    fn metadata_keeps_wire_order() {
        let text = r#"{"unitCode":{"type":"Text","value":"CEL"},"accuracy":{"type":"Number","value":0.5}}"#;

        let metadata: Metadata = serde_json::from_str(text).unwrap();
        assert_eq!(serde_json::to_string(&metadata).unwrap(), text);

        let metadata = Metadata::with_unit_code("Text", "CEL")
            .entry("accuracy", MetadataEntry::new("Number", 0.5));
        assert_eq!(serde_json::to_string(&metadata).unwrap(), text);
    }

    #[test]
    fn static_attribute_json_value() {
        assert_eq!(
            serialize(StaticAttribute::new("location", "geo:json", json!({"type": "Point"}))),
            json!({
                "name": "location",
                "type": "geo:json",
                "value": { "type": "Point" },
            })
        );
    }
}
