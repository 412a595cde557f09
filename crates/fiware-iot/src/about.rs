use serde::{Deserialize, Deserializer, Serialize};

/// Version and listening information exposed by an `IoT-Agent`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    /// Version of the agent library.
    pub lib_version: String,
    /// Port of the northbound API.
    ///
    /// Agents report it either as a string or as a number.
    #[serde(deserialize_with = "port_as_text")]
    pub port: String,
    /// Base root of the northbound API.
    pub base_root: String,
    /// Version of the agent itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

fn port_as_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u64),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Text(port) => port,
        Port::Number(port) => port.to_string(),
    })
}
