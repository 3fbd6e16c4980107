#![allow(dead_code)]

use std::{
    collections::VecDeque,
    net::{SocketAddr, TcpListener},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use diffusion_jobs_api::{app::envy::Envy, router, AppState};

pub const TOKEN: &str = "rp_test_token";

/// Scripted stand-in for the RunPod serverless endpoint.
pub struct MockRunpod {
    pub addr: SocketAddr,
    pub state: Arc<MockState>,
}

pub struct MockState {
    run_reply: Mutex<(StatusCode, Value)>,
    statuses: Mutex<VecDeque<Value>>,
    last_status: Mutex<Value>,
    pub run_bodies: Mutex<Vec<Value>>,
    pub run_calls: AtomicUsize,
    pub status_reads: AtomicUsize,
}

impl MockRunpod {
    pub async fn start(statuses: Vec<Value>) -> Self {
        let state = Arc::new(MockState {
            run_reply: Mutex::new((
                StatusCode::OK,
                json!({ "id": "job-1", "status": "IN_QUEUE" }),
            )),
            statuses: Mutex::new(statuses.into()),
            last_status: Mutex::new(json!({ "status": "IN_QUEUE", "retries": 0 })),
            run_bodies: Mutex::new(Vec::new()),
            run_calls: AtomicUsize::new(0),
            status_reads: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/stable-diffusion-v1/run", post(run))
            .route("/stable-diffusion-v1/status/:id", get(status_handler))
            .with_state(state.clone());

        Self {
            addr: serve(app),
            state,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn reply_to_run(&self, status: StatusCode, body: Value) {
        *self.state.run_reply.lock().unwrap() = (status, body);
    }

    pub fn run_calls(&self) -> usize {
        self.state.run_calls.load(Ordering::SeqCst)
    }

    pub fn status_reads(&self) -> usize {
        self.state.status_reads.load(Ordering::SeqCst)
    }

    pub fn run_bodies(&self) -> Vec<Value> {
        self.state.run_bodies.lock().unwrap().clone()
    }

    pub fn envy(&self) -> Envy {
        Envy {
            runpod_api_url: self.url(),
            poll_interval_ms: 20,
            max_poll_attempts: 50,
            request_timeout_secs: 5,
            ..Envy::default()
        }
    }
}

pub fn status(status: &str, retries: u32, images: &[&str]) -> Value {
    let output: Vec<Value> = images.iter().map(|image| json!({ "image": image })).collect();

    json!({ "id": "job-1", "status": status, "retries": retries, "output": output })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn run(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.run_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        );
    }

    state.run_bodies.lock().unwrap().push(body);
    let (status, reply) = state.run_reply.lock().unwrap().clone();

    (status, Json(reply))
}

async fn status_handler(
    State(state): State<Arc<MockState>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        );
    }

    state.status_reads.fetch_add(1, Ordering::SeqCst);

    let mut last = state.last_status.lock().unwrap();
    if let Some(next) = state.statuses.lock().unwrap().pop_front() {
        *last = next;
    }

    (StatusCode::OK, Json(last.clone()))
}

/// Serves `app` on an ephemeral local port.
pub fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().expect("local addr");

    let server = axum::Server::from_tcp(listener)
        .expect("server from listener")
        .serve(app.into_make_service());
    tokio::spawn(server);

    addr
}

/// Runs the service itself against `mock`, returning its base URL.
pub fn start_service(mock: &MockRunpod) -> (String, Arc<AppState>) {
    let state = Arc::new(AppState::new(mock.envy()).expect("app state"));
    let addr = serve(router(state.clone()));

    (format!("http://{}", addr), state)
}
