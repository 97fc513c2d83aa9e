mod data;
mod error;
mod schemas;
mod swapi_client;

pub use data::film::Film;
pub use error::Error;
pub use schemas::{film_schema, film_schema_validator};
pub use swapi_client::{default_request_config, SwapiClient, SwapiClientBuilder, DEFAULT_BASE_URI};
