//! A mocked `IoT-Agent` and `IoT-Manager` built on wiremock.
//!
//! The agent behaves a bit like a real one: it checks the tenant headers,
//! refuses the `fail` service, validates write bodies and requires both
//! query parameters when deleting a service group.

#![allow(dead_code)]

use serde_json::{Value, json};

use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use fiware_iot_client::agent::AgentClient;
use fiware_iot_client::error::{
    DEVICE_NOT_FOUND, DUPLICATE_DEVICE_ID, MISSING_HEADERS, WRONG_SYNTAX,
};
use fiware_iot_client::schema::attribute::{Attribute, Command, Lazy, Metadata};
use fiware_iot_client::schema::service::ServiceGroup;
use fiware_iot_client::tenant::{FIWARE_SERVICE, FIWARE_SERVICE_PATH, TenantContext};

/// The service which makes the agent refuse every request.
pub const FAILING_SERVICE: &str = "fail";

/// A device the agent does not know.
pub const MISSING_DEVICE_ID: &str = "missing";

/// A device already provisioned on the agent.
pub const TAKEN_DEVICE_ID: &str = "sensor00";

/// Installs a test subscriber, once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn service_group() -> ServiceGroup {
    ServiceGroup::new("/iot/d", "apiKey")
        .entity_type("ul")
        .trust("asdfj1123")
        .cb_host("http://orion:1026")
        .protocol("ul")
        .command(Command::new("Test", "int"))
        .attribute(
            Attribute::new("Temperature", "Number").metadata(Metadata::with_unit_code("", "")),
        )
        .lazy(Lazy::new("lazyAttribute", "Text"))
}

fn agent_error(status: u16, name: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "name": name,
        "message": message,
    }))
}

fn header<'a>(request: &'a Request, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn query(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn check_tenant(request: &Request) -> Option<ResponseTemplate> {
    let service = header(request, FIWARE_SERVICE);
    if service.is_empty() || header(request, FIWARE_SERVICE_PATH).is_empty() {
        return Some(agent_error(
            400,
            MISSING_HEADERS,
            "Some headers were missing from the request: [\"fiware-service\",\"fiware-servicepath\"]",
        ));
    }
    if service == FAILING_SERVICE {
        return Some(agent_error(400, WRONG_SYNTAX, "Failed because you want to."));
    }
    None
}

fn check_body(request: &Request, field: &str) -> Option<ResponseTemplate> {
    let valid = serde_json::from_slice::<Value>(&request.body)
        .ok()
        .is_some_and(|body| body.get(field).is_some());
    if valid {
        None
    } else {
        Some(agent_error(
            400,
            WRONG_SYNTAX,
            "Wrong syntax in request: Errors found validating request.",
        ))
    }
}

fn read(body: Value) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |request: &Request| {
        check_tenant(request)
            .unwrap_or_else(|| ResponseTemplate::new(200).set_body_json(body.clone()))
    }
}

fn write(field: &'static str) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    move |request: &Request| {
        check_tenant(request)
            .or_else(|| check_body(request, field))
            .unwrap_or_else(|| ResponseTemplate::new(200))
    }
}

fn create_devices(request: &Request) -> ResponseTemplate {
    if let Some(response) = check_tenant(request).or_else(|| check_body(request, "devices")) {
        return response;
    }
    let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
    let taken = body["devices"]
        .as_array()
        .into_iter()
        .flatten()
        .any(|device| device["device_id"] == TAKEN_DEVICE_ID);
    if taken {
        return agent_error(
            409,
            DUPLICATE_DEVICE_ID,
            &format!("A device with the same pair (Service, DeviceId) was found: berlin/{TAKEN_DEVICE_ID}"),
        );
    }
    ResponseTemplate::new(200)
}

fn delete_service(request: &Request) -> ResponseTemplate {
    if let Some(response) = check_tenant(request) {
        return response;
    }
    if query(request, "apikey").is_none() || query(request, "resource").is_none() {
        return agent_error(
            400,
            MISSING_HEADERS,
            "Some headers were missing from the request: [\"apikey\"]",
        );
    }
    ResponseTemplate::new(200)
}

/// A mocked `IoT-Agent` storing a fixed set of service groups and devices.
pub struct MockAgent {
    server: MockServer,
}

impl MockAgent {
    pub async fn start(services: Value, devices: Value) -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/iot/about"))
            .respond_with(read(json!({
                "libVersion": "2.12.0",
                "port": 4041,
                "baseRoot": "/",
                "version": "1.14.0",
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/iot/services"))
            .respond_with(read(services))
            .mount(&server)
            .await;

        for verb in ["POST", "PUT"] {
            Mock::given(method(verb))
                .and(path("/iot/services"))
                .respond_with(write("services"))
                .mount(&server)
                .await;
        }

        Mock::given(method("DELETE"))
            .and(path("/iot/services"))
            .respond_with(delete_service)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/iot/devices"))
            .respond_with(read(devices.clone()))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/iot/devices"))
            .respond_with(create_devices)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/iot/devices"))
            .respond_with(write("device_id"))
            .mount(&server)
            .await;

        Mock::given(path(format!("/iot/devices/{MISSING_DEVICE_ID}")))
            .respond_with(agent_error(
                404,
                DEVICE_NOT_FOUND,
                &format!("No device was found with id:{MISSING_DEVICE_ID}"),
            ))
            .with_priority(1)
            .mount(&server)
            .await;

        let first_device = devices["devices"].get(0).cloned().unwrap_or(Value::Null);
        Mock::given(method("GET"))
            .and(path_regex(r"^/iot/devices/[^/]+$"))
            .respond_with(read(first_device))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path_regex(r"^/iot/devices/[^/]+$"))
            .respond_with(read(Value::Null))
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self, tenant: TenantContext) -> AgentClient {
        AgentClient::builder()
            .host(format!("{}/", self.uri()))
            .tenant(tenant)
            .build()
            .unwrap()
    }

    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
