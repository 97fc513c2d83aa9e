use crate::error::Error;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::{
    header::{HeaderName, HeaderValue},
    Url,
};
use std::{collections::BTreeMap, time::Duration};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

lazy_static! {
    static ref MIME_TYPE_REGEX: Regex = Regex::new(
        r"^[A-Za-z0-9][A-Za-z0-9!#$^_.+-]*/[A-Za-z0-9][A-Za-z0-9!#$^_.+-]*(\s*;\s*[^;=\s]+=[^;]+)*$"
    )
    .unwrap();
}

/// Default settings shared by every call of a test case: the base URI the
/// request paths are resolved against, the default headers and the timeout.
///
/// A `RequestConfig` can't be changed once built.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    base_uri: Url,
    default_headers: BTreeMap<String, String>,
    timeout: Duration,
}

impl RequestConfig {
    /// Build a configuration that sends `content_type` as both `Content-Type`
    /// and `Accept`.
    ///
    /// # Errors
    /// `Error::Configuration` if `base_uri` is not an absolute http(s) URI or
    /// `content_type` is not a MIME type.
    pub fn build<S1: Into<String>, S2: Into<String>>(
        base_uri: S1,
        content_type: S2,
    ) -> Result<Self, Error> {
        RequestConfigBuilder::new()
            .with_base_uri(base_uri)
            .with_content_type(content_type)
            .build()
    }

    pub fn builder() -> RequestConfigBuilder {
        RequestConfigBuilder::new()
    }

    pub fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Header names are lowercase.
    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve `path` against the base URI. The path is always taken as
    /// relative, so `"/films/1/"` on `https://swapi.dev/api/` gives
    /// `https://swapi.dev/api/films/1/`.
    ///
    /// # Errors
    /// `Error::Configuration` if `path` is an absolute URL or resolves to a
    /// location outside the base URI (`"../"`).
    pub fn url_for(&self, path: &str) -> Result<Url, Error> {
        if Url::parse(path).is_ok() {
            return Err(Error::Configuration(format!(
                "The request path `{}` should be relative to {}",
                path, self.base_uri
            )));
        }

        let url = self
            .base_uri
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Configuration(format!("Invalid request path `{}`: {}", path, e)))?;

        if !url.as_str().starts_with(self.base_uri.as_str()) {
            return Err(Error::Configuration(format!(
                "The request path `{}` leaves the base URI {}",
                path, self.base_uri
            )));
        }

        Ok(url)
    }
}

/// Builder used to build a RequestConfig instance
#[derive(Debug, Clone, Default)]
pub struct RequestConfigBuilder {
    base_uri: Option<String>,
    content_type: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestConfigBuilder {
    pub fn new() -> Self {
        Self {
            base_uri: None,
            content_type: None,
            headers: Vec::new(),
            timeout: None,
        }
    }

    /// Use the given base URI. Every request path is resolved against it.
    pub fn with_base_uri<T: Into<String>>(mut self, base_uri: T) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Send the given MIME type as `Content-Type` and `Accept`.
    pub fn with_content_type<T: Into<String>>(mut self, content_type: T) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Send an extra header with every request. A header given here wins over
    /// the ones derived from the content type.
    pub fn with_header<S1: Into<String>, S2: Into<String>>(mut self, name: S1, value: S2) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consume the builder and validate the collected values.
    ///
    /// # Errors
    /// `Error::Configuration` for a missing, empty or malformed base URI, a
    /// malformed content type, an invalid header or a zero timeout.
    pub fn build(self) -> Result<RequestConfig, Error> {
        let base_uri = Self::parse_base_uri(self.base_uri.as_deref().unwrap_or(""))?;
        let mut default_headers = BTreeMap::new();

        if let Some(content_type) = self.content_type {
            let content_type = content_type.trim();
            if !MIME_TYPE_REGEX.is_match(content_type) {
                return Err(Error::Configuration(format!(
                    "`{}` is not a MIME type",
                    content_type
                )));
            }
            default_headers.insert(String::from("content-type"), String::from(content_type));
            default_headers.insert(String::from("accept"), String::from(content_type));
        }

        for (name, value) in self.headers {
            let name = HeaderName::from_bytes(name.trim().as_bytes())?;
            HeaderValue::from_str(&value)?;
            default_headers.insert(String::from(name.as_str()), value);
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(Error::Configuration(String::from(
                "The timeout must be greater than zero",
            )));
        }

        Ok(RequestConfig {
            base_uri,
            default_headers,
            timeout,
        })
    }

    fn parse_base_uri(raw: &str) -> Result<Url, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::Configuration(String::from(
                "The base URI must not be empty",
            )));
        }

        let mut url = Url::parse(raw)
            .map_err(|e| Error::Configuration(format!("Invalid base URI `{}`: {}", raw, e)))?;

        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(Error::Configuration(format!(
                "The base URI `{}` should be an absolute http(s) URI",
                raw
            )));
        }

        // joining replaces the last path segment unless the path ends with '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}
