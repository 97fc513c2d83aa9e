use crate::{
    error::Error,
    http_client::{HttpClient, ReqwestHttpClient},
    HttpResponse, RequestConfig, RequestData,
};
use std::sync::Arc;
use tracing::debug;

/// Issues requests against the base URI of a [`RequestConfig`].
///
/// Any status code is returned as data; only a failure to get a response at
/// all is an error.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Arc<dyn HttpClient + Send + Sync>,
}

impl ApiClient {
    /// Create an ApiClient with the default reqwest client.
    pub fn new() -> Self {
        Self {
            http_client: Arc::new(ReqwestHttpClient::new()),
        }
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient + Send + Sync>) -> Self {
        Self { http_client }
    }

    /// Send a GET request for `path`.
    ///
    /// # Errors
    /// `Error::Configuration` if the path can't be resolved, `Error::Transport`
    /// on connection failure or timeout.
    pub fn get(&self, path: &str, config: &RequestConfig) -> Result<HttpResponse, Error> {
        self.request("GET", path, None, config)
    }

    /// Send a request with any method and an optional body.
    ///
    /// # Errors
    /// `Error::Configuration` if the path can't be resolved within the base URI
    /// or `method` is not a valid HTTP method, `Error::Transport` on connection
    /// failure or timeout.
    pub fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<&str>,
        config: &RequestConfig,
    ) -> Result<HttpResponse, Error> {
        let url = config.url_for(path)?;
        let request_data = RequestData {
            uri: url.into(),
            method: method.to_uppercase(),
            headers: config
                .default_headers()
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            body: body.map(String::from).unwrap_or_default(),
        };

        debug!(method = %request_data.method, uri = %request_data.uri, "sending request");
        let response = self
            .http_client
            .make_request(&request_data, config.timeout())?;
        debug!(
            status_code = response.status_code(),
            body_length = response.bytes().len(),
            "received response"
        );

        Ok(response)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        collections::HashMap,
        net::TcpListener,
        sync::Mutex,
        time::{Duration, Instant},
    };

    #[derive(Debug, Default)]
    struct CannedHttpClient {
        status_code: u16,
        requests: Mutex<Vec<(RequestData, Duration)>>,
    }

    impl HttpClient for CannedHttpClient {
        fn make_request(
            &self,
            request_data: &RequestData,
            timeout: Duration,
        ) -> Result<HttpResponse, Error> {
            self.requests
                .lock()
                .unwrap()
                .push((request_data.clone(), timeout));
            Ok(HttpResponse::new(
                self.status_code,
                HashMap::new(),
                String::from(r#"{"detail": "Not found"}"#),
            ))
        }
    }

    fn config() -> RequestConfig {
        RequestConfig::builder()
            .with_base_uri("https://swapi.dev/api/")
            .with_content_type("application/json")
            .with_timeout(Duration::from_secs(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_get_applies_config() {
        let http_client = Arc::new(CannedHttpClient {
            status_code: 200,
            ..Default::default()
        });
        let api_client = ApiClient::with_http_client(http_client.clone());

        api_client.get("/films/1/", &config()).unwrap();

        let requests = http_client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (request_data, timeout) = &requests[0];
        assert_eq!(request_data.method, "GET");
        assert_eq!(request_data.uri, "https://swapi.dev/api/films/1/");
        assert_eq!(
            request_data.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert!(request_data.body.is_empty());
        assert_eq!(*timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_non_success_status_is_returned_as_data() {
        let api_client = ApiClient::with_http_client(Arc::new(CannedHttpClient {
            status_code: 404,
            ..Default::default()
        }));

        let response = api_client.get("/films/42/", &config()).unwrap();

        assert_eq!(response.status_code(), 404);
        assert!(!response.is_success());
    }

    #[test]
    fn test_request_sends_method_and_body() {
        let http_client = Arc::new(CannedHttpClient {
            status_code: 405,
            ..Default::default()
        });
        let api_client = ApiClient::with_http_client(http_client.clone());

        api_client
            .request("post", "films/", Some(r#"{"title": "Rogue One"}"#), &config())
            .unwrap();

        let requests = http_client.requests.lock().unwrap();
        assert_eq!(requests[0].0.method, "POST");
        assert_eq!(requests[0].0.body, r#"{"title": "Rogue One"}"#);
    }

    #[test]
    fn test_connection_failure_is_a_transport_error() {
        let config = RequestConfig::builder()
            .with_base_uri("http://127.0.0.1:1/")
            .with_timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let result = ApiClient::new().get("/films/1/", &config);

        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn test_timeout_is_a_transport_error() {
        // accepted by the kernel backlog but never answered
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let config = RequestConfig::builder()
            .with_base_uri(format!("http://{}/", listener.local_addr().unwrap()))
            .with_timeout(Duration::from_millis(300))
            .build()
            .unwrap();

        let started = Instant::now();
        let result = ApiClient::new().get("/films/1/", &config);

        assert!(matches!(result, Err(Error::Transport(_))));
        assert!(started.elapsed() < Duration::from_secs(10));
        drop(listener);
    }

    #[test]
    fn test_invalid_method_is_a_configuration_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let config = RequestConfig::build(
            format!("http://{}/", listener.local_addr().unwrap()),
            "application/json",
        )
        .unwrap();

        let result = ApiClient::new().request("NOT A METHOD", "films/", None, &config);

        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_path_outside_base_uri_is_not_sent() {
        let http_client = Arc::new(CannedHttpClient {
            status_code: 200,
            ..Default::default()
        });
        let api_client = ApiClient::with_http_client(http_client.clone());

        for path in &["https://evil.example/films/1/", "../films/1/"] {
            assert!(matches!(
                api_client.get(path, &config()),
                Err(Error::Configuration(_))
            ));
        }
        assert!(http_client.requests.lock().unwrap().is_empty());
    }
}
