use crate::{data::film::Film, error::Error};
use apicontract::{ApiClient, HttpResponse, RequestConfig};
use tracing::debug;

pub const DEFAULT_BASE_URI: &str = "https://swapi.dev/api/";
const CONTENT_TYPE: &str = "application/json";

/// The request configuration every Star Wars API call is made with.
pub fn default_request_config() -> Result<RequestConfig, apicontract::Error> {
    RequestConfig::build(DEFAULT_BASE_URI, CONTENT_TYPE)
}

/// Builder used to build a SwapiClient instance
#[derive(Debug, Clone, Default)]
pub struct SwapiClientBuilder {
    base_uri: Option<String>,
    request_config: Option<RequestConfig>,
    api_client: Option<ApiClient>,
}

impl SwapiClientBuilder {
    /// Create a new SwapiClientBuilder instance.
    pub fn new() -> Self {
        Self {
            base_uri: None,
            request_config: None,
            api_client: None,
        }
    }

    /// Use the given base URI when building a SwapiClient instance.
    ///
    /// # Arguments
    /// `base_uri` - the URI the resource paths are resolved against.
    ///
    /// # Returns
    /// This builder.
    pub fn with_base_uri<T: Into<String>>(mut self, base_uri: T) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Use a complete request configuration. It takes precedence over a base
    /// URI given with `with_base_uri`.
    pub fn with_request_config(mut self, request_config: RequestConfig) -> Self {
        self.request_config = Some(request_config);
        self
    }

    /// Use the given ApiClient when building a SwapiClient instance.
    ///
    /// # Arguments
    /// `api_client` - a pre-configured ApiClient.
    ///
    /// # Returns
    /// This builder.
    pub fn with_api_client(mut self, api_client: ApiClient) -> Self {
        self.api_client = Some(api_client);
        self
    }

    /// Consume the builder and create a SwapiClient instance using all of the previously configured values or
    /// their defaults.
    ///
    /// # Returns
    /// A SwapiClient instance, or a configuration error if the base URI is invalid.
    pub fn build(mut self) -> Result<SwapiClient, Error> {
        let config = match (self.request_config.take(), self.base_uri.take()) {
            (Some(config), _) => config,
            (None, Some(base_uri)) => RequestConfig::build(base_uri, CONTENT_TYPE)?,
            (None, None) => default_request_config()?,
        };

        Ok(SwapiClient {
            api: self.api_client.take().unwrap_or_default(),
            config,
        })
    }
}

/// Struct that represents a Star Wars API client.
#[derive(Debug, Clone)]
pub struct SwapiClient {
    api: ApiClient,
    config: RequestConfig,
}

impl SwapiClient {
    /// Create a SwapiClient for `https://swapi.dev/api/` with the default reqwest client.
    pub fn new() -> Result<Self, Error> {
        SwapiClientBuilder::new().build()
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Gets the raw response for a film, whatever its status code.
    ///
    /// # Arguments
    /// `id` - the film id, starting at 1.
    pub fn film_response(&self, id: u32) -> Result<HttpResponse, Error> {
        Self::check_id(id)?;

        Ok(self.api.get(&Self::film_path(id), &self.config)?)
    }

    /// Gets a film from the Star Wars API.
    ///
    /// # Arguments
    /// `id` - the film id, starting at 1.
    ///
    /// # Returns
    /// The film, `Error::NotFound` if there is no film with that id.
    pub fn get_film(&self, id: u32) -> Result<Film, Error> {
        let path = Self::film_path(id);
        let response = self.film_response(id)?;
        debug!(id, status_code = response.status_code(), "film response");

        match response.status_code() {
            200 => Ok(response.deserialize()?),
            404 => Err(Error::NotFound(path)),
            status_code => Err(Error::UnexpectedStatus { path, status_code }),
        }
    }

    fn film_path(id: u32) -> String {
        format!("films/{}/", id)
    }

    fn check_id(id: u32) -> Result<(), Error> {
        if id == 0 {
            Err(Error::InvalidResourceId(id))
        } else {
            Ok(())
        }
    }
}
