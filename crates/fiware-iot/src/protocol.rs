use serde::{Deserialize, Serialize};

/// A protocol adapter registered on an `IoT-Manager`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDescriptor {
    /// Registration identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Address of the `IoT-Agent` owning the protocol.
    pub iotagent: String,
    /// Southbound resource path.
    pub resource: String,
    /// Protocol tag.
    pub protocol: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Revision counter.
    #[serde(rename = "__v", default)]
    pub revision: u64,
}

/// The `IoT-Manager` response listing its [`ProtocolDescriptor`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolList {
    /// Number of registered protocols.
    #[serde(default)]
    pub count: u64,
    /// Registered protocols, in backend order.
    #[serde(default)]
    pub protocols: Vec<ProtocolDescriptor>,
}
