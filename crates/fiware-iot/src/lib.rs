//! The data exchanged between a client and the FIWARE `IoT` services.
//!
//! This crate provides the canonical wire schema to:
//!
//! - Describe service groups. A service group is a provisioning policy
//!   shared by a class of devices which use the same protocol and API key.
//! - Describe provisioned devices together with their attribute and
//!   command mappings.
//! - Decode the protocol adapters registered on an `IoT-Manager` and the
//!   version information exposed by an `IoT-Agent`.
//! - Decode the structured error body returned by an `IoT-Agent` when a
//!   request fails.
//!
//! All structures are serializable and deserializable. Optional fields and
//! empty lists are omitted on the wire, so a partially filled structure can
//! be sent as a partial update.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Version information about an `IoT-Agent`.
pub mod about;
/// Attributes, commands and metadata attached to devices and service groups.
pub mod attribute;
/// Provisioned devices.
pub mod device;
/// Protocol adapters registered on an `IoT-Manager`.
pub mod protocol;
/// Error body returned by an `IoT-Agent`.
pub mod response;
/// Service groups.
pub mod service;

#[cfg(test)]
pub(crate) fn serialize<T: serde::Serialize>(value: T) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}

#[cfg(test)]
pub(crate) fn deserialize<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).unwrap()
}
