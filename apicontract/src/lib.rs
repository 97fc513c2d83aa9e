mod api_client;
mod assertions;
mod data;
mod error;
mod fixture_server;
mod http_client;
mod logging;
mod request_config;
mod schema;
mod util;

pub use api_client::ApiClient;
pub use apicontract_codegen::contract_test;
pub use assertions::ResponseAssert;
pub use data::{HttpResponse, RequestData};
pub use error::Error;
pub use fixture_server::{FixtureServer, FixtureServerBuilder};
pub use http_client::{HttpClient, ReqwestHttpClient};
pub use logging::init_test_logging;
pub use request_config::{RequestConfig, RequestConfigBuilder, DEFAULT_TIMEOUT};
pub use schema::{validate, SchemaDocument, SchemaValidator, ValidationResult, Violation, Violations};
