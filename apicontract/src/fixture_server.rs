//! A local HTTP server that replays canned responses, so contract tests can
//! run against a recorded copy of an API instead of the real one.

use crate::{error::Error, RequestData};
use hyper::{
    body,
    service::{make_service_fn, service_fn},
    header::{HeaderValue, CONTENT_TYPE},
    Body, HeaderMap, Request, Response, Server, StatusCode,
};
use std::{
    collections::HashMap,
    convert::Infallible,
    net::{SocketAddr, TcpListener},
    sync::{Arc, Mutex},
    thread::{self, JoinHandle},
};
use tokio::{runtime::Builder, sync::Notify};
use tracing::{debug, error};

const NOT_FOUND_BODY: &str = r#"{"detail":"Not found"}"#;

#[derive(Debug, Clone)]
struct CannedResponse {
    status_code: u16,
    content_type: String,
    body: Vec<u8>,
}

#[derive(Debug, Default)]
struct FixtureState {
    routes: HashMap<String, CannedResponse>,
    received: Mutex<Vec<RequestData>>,
}

/// Builder used to build a FixtureServer instance
#[derive(Debug, Default)]
pub struct FixtureServerBuilder {
    routes: HashMap<String, CannedResponse>,
}

impl FixtureServerBuilder {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Answer requests for `path` with a JSON body. The body is served byte
    /// for byte.
    pub fn route<P: Into<String>, B: Into<Vec<u8>>>(
        self,
        path: P,
        status_code: u16,
        body: B,
    ) -> Self {
        self.route_with_content_type(path, status_code, "application/json", body)
    }

    pub fn route_with_content_type<P: Into<String>, C: Into<String>, B: Into<Vec<u8>>>(
        mut self,
        path: P,
        status_code: u16,
        content_type: C,
        body: B,
    ) -> Self {
        self.routes.insert(
            path.into(),
            CannedResponse {
                status_code,
                content_type: content_type.into(),
                body: body.into(),
            },
        );
        self
    }

    /// Bind an ephemeral port on 127.0.0.1 and start serving on a background
    /// thread.
    pub fn start(self) -> Result<FixtureServer, Error> {
        for (path, canned) in &self.routes {
            StatusCode::from_u16(canned.status_code).map_err(|_| {
                Error::Configuration(format!(
                    "Invalid status code {} for fixture route {}",
                    canned.status_code, path
                ))
            })?;
        }

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))?;
        listener.set_nonblocking(true)?;
        let address = listener.local_addr()?;

        let state = Arc::new(FixtureState {
            routes: self.routes,
            received: Mutex::new(Vec::new()),
        });
        let shutdown = Arc::new(Notify::new());
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let server_state = state.clone();
        let server_shutdown = shutdown.clone();
        let join_handle = thread::spawn(move || {
            runtime.block_on(async move {
                let builder = match Server::from_tcp(listener) {
                    Ok(builder) => builder,
                    Err(e) => {
                        error!(%address, "fixture server failed to start: {}", e);
                        return;
                    }
                };

                let server = builder
                    .serve(make_service_fn(move |_| {
                        let state = server_state.clone();
                        async move {
                            Ok::<_, Infallible>(service_fn(move |request| {
                                let state = state.clone();
                                async move { Ok::<_, Infallible>(respond(&state, request).await) }
                            }))
                        }
                    }))
                    .with_graceful_shutdown(async move { server_shutdown.notified().await });

                if let Err(e) = server.await {
                    error!(%address, "fixture server error: {}", e);
                }
            });
        });

        debug!(%address, "fixture server started");

        Ok(FixtureServer {
            address,
            state,
            shutdown,
            join_handle: Some(join_handle),
        })
    }
}

/// A running fixture server. Dropping it stops the server.
#[derive(Debug)]
pub struct FixtureServer {
    address: SocketAddr,
    state: Arc<FixtureState>,
    shutdown: Arc<Notify>,
    join_handle: Option<JoinHandle<()>>,
}

impl FixtureServer {
    pub fn builder() -> FixtureServerBuilder {
        FixtureServerBuilder::new()
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// `http://127.0.0.1:<port>/`
    pub fn base_uri(&self) -> String {
        format!("http://{}/", self.address)
    }

    /// Every request received so far, oldest first.
    pub fn received(&self) -> Vec<RequestData> {
        match self.state.received.lock() {
            Ok(received) => received.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.shutdown.notify_one();
        if let Some(join_handle) = self.join_handle.take() {
            let _ = join_handle.join();
        }
    }
}

async fn respond(state: &FixtureState, request: Request<Body>) -> Response<Body> {
    let (parts, request_body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let request_body = match body::to_bytes(request_body).await {
        Ok(request_body) => request_body,
        Err(e) => {
            error!(%path, "failed to read the fixture request body: {}", e);
            body::Bytes::new()
        }
    };

    let request_data = RequestData {
        uri: parts.uri.to_string(),
        method: parts.method.to_string(),
        headers: extract_headers(&parts.headers),
        body: String::from_utf8_lossy(&request_body).into(),
    };
    debug!(method = %request_data.method, uri = %request_data.uri, "fixture request");
    match state.received.lock() {
        Ok(mut received) => received.push(request_data),
        Err(poisoned) => poisoned.into_inner().push(request_data),
    }

    let (status_code, content_type, response_body) = match state.routes.get(&path) {
        Some(canned) => (
            canned.status_code,
            canned.content_type.as_str(),
            canned.body.clone(),
        ),
        None => (404, "application/json", NOT_FOUND_BODY.as_bytes().to_vec()),
    };

    let mut response = Response::new(Body::from(response_body));
    *response.status_mut() =
        StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if let Ok(content_type) = content_type.parse::<HeaderValue>() {
        response.headers_mut().insert(CONTENT_TYPE, content_type);
    }

    response
}

fn extract_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    header_map
        .iter()
        .filter_map(|(key, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (String::from(key.as_str()), String::from(value)))
        })
        .collect()
}
