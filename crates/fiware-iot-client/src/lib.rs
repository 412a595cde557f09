//! The `fiware-iot-client` library crate provides tenant-aware clients for
//! the FIWARE `IoT` services.
//!
//! Core functionalities of this crate include:
//!
//! - Provisioning service groups and devices on an `IoT-Agent`, and
//!   querying them back
//! - Listing the protocol adapters registered on an `IoT-Manager`
//! - Scoping every request to a tenant through the `fiware-service` and
//!   `fiware-servicePath` headers
//! - Translating backend failures into a typed error taxonomy, keeping
//!   network failures apart from structured backend errors
//!
//! Every operation is a single request/response exchange. Clients hold no
//! mutable state, so they can be shared across tasks, and no request is
//! ever retried. The HTTP exchange itself is delegated to a
//! [`transport::Transport`], implemented by default on [`reqwest::Client`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// A client for provisioning service groups and devices on an `IoT-Agent`.
pub mod agent;
/// Client configuration loaded from external sources.
pub mod config;
/// The normalized base address of a service.
pub mod endpoint;
/// Error management.
pub mod error;
/// A client for listing the protocols registered on an `IoT-Manager`.
pub mod manager;
/// Interpretation of the responses received from a service.
pub mod response;
/// The tenant headers attached to every request.
pub mod tenant;
/// The HTTP exchange capability used by the clients.
pub mod transport;

pub use fiware_iot as schema;
