//! Stub Remote Directory Service served by Actix on an ephemeral port.
//!
//! Every request is captured verbatim. Responses are scripted: a fixed status
//! and body, plus an optional delay for timeout coverage.

use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    /// Raw, still percent-encoded request path.
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("captured body should be JSON")
    }
}

/// Scripted reply returned for every request.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl StubReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: None,
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Running stub server. Stop it with [`StubDirectory::stop`].
pub struct StubDirectory {
    pub base_url: String,
    handle: ServerHandle,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubDirectory {
    /// Bind to `127.0.0.1:0` and serve `reply` for every request.
    pub fn spawn(reply: StubReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let addr = listener.local_addr().expect("listener address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            requests: requests.clone(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state.clone()))
                .default_service(web::to(capture))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on ephemeral port")
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            handle,
            requests,
        }
    }

    /// URL on this stub for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn capture(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<StubState>,
) -> HttpResponse {
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(CapturedRequest {
            method: request.method().to_string(),
            path: request.uri().path().to_owned(),
            content_type: request
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
            body: body.to_vec(),
        });

    if let Some(delay) = state.reply.delay {
        actix_web::rt::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(state.reply.status).expect("scripted status is valid");
    HttpResponse::build(status)
        .content_type("application/json")
        .body(state.reply.body.clone())
}
