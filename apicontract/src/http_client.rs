use crate::{error::Error, util, HttpResponse, RequestData};
use reqwest::{blocking::Client, header::HeaderMap, Method};
use std::{fmt::Debug, time::Duration};

/// The transport behind [`ApiClient`](crate::ApiClient). A call sends exactly
/// one request and blocks until the response or the timeout.
pub trait HttpClient: Debug {
    fn make_request(&self, request_data: &RequestData, timeout: Duration)
        -> Result<HttpResponse, Error>;
}

#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a pre-configured blocking reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpClient for ReqwestHttpClient {
    fn make_request(
        &self,
        request_data: &RequestData,
        timeout: Duration,
    ) -> Result<HttpResponse, Error> {
        let method = Method::from_bytes(request_data.method.as_bytes()).map_err(|_| {
            Error::Configuration(format!("Invalid HTTP method `{}`", request_data.method))
        })?;

        let mut headers = HeaderMap::new();
        util::put_headers(&mut headers, &request_data.headers)?;

        let mut request_builder = self
            .client
            .request(method, request_data.uri.as_str())
            .headers(headers)
            .timeout(timeout);

        if !request_data.body.is_empty() {
            request_builder = request_builder.body(request_data.body.clone());
        }

        let response = request_builder.send()?;

        let status_code = response.status().as_u16();
        let headers = util::extract_headers(response.headers());
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse::new(status_code, headers, body))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}
