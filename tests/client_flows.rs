//! End-to-end client behavior against a stub backend: offline fallback,
//! session handling, and the approval flow. The stub counts requests per
//! endpoint so the tests can assert exactly which calls hit the network.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::tempdir;

use krushi_mitra::advisory::{AdvisoryClient, AdvisoryError, DataSource, LoginInput, RegisterInput, RuntimeMode};
use krushi_mitra::api::ApiError;
use krushi_mitra::config::Config;
use krushi_mitra::session::{Role, Session, SessionStore, UserProfile};

// ============================================
// Stub backend
// ============================================

#[derive(Default)]
struct StubState {
    login_calls: AtomicUsize,
    register_calls: AtomicUsize,
    questions_calls: AtomicUsize,
    schemes_calls: AtomicUsize,
    pending_calls: AtomicUsize,
    approve_calls: AtomicUsize,
    /// Authorization header observed on each schemes request.
    schemes_auth: Mutex<Vec<Option<String>>>,
    approved: Mutex<HashSet<u64>>,
    /// Answer every read with HTTP 500.
    fail_reads: bool,
    /// Answer login with HTTP 401.
    reject_login: bool,
    /// Role reported for users logged in via the stub.
    login_role: &'static str,
}

struct Stub {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl Stub {
    async fn start(state: StubState) -> Stub {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/questions/public", get(public_questions))
            .route("/api/government-schemes/public", get(schemes))
            .route("/api/users/experts/pending", get(pending_experts))
            .route("/api/users/experts/:id/approve", post(approve_expert))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Stub { addr, state }
    }

    fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }
}

fn default_stub() -> StubState {
    StubState {
        login_role: "FARMER",
        ..StubState::default()
    }
}

async fn login(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if state.reject_login {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        )
            .into_response();
    }
    let username = body["username"].as_str().unwrap_or("user@example.com");
    Json(json!({
        "token": "live-token-1",
        "user": {
            "id": 1,
            "username": username,
            "email": username,
            "firstName": "Live",
            "lastName": "User",
            "role": state.login_role,
        }
    }))
    .into_response()
}

async fn register(State(state): State<Arc<StubState>>, Json(body): Json<Value>) -> impl IntoResponse {
    state.register_calls.fetch_add(1, Ordering::SeqCst);
    let username = body["username"].as_str().unwrap_or("user@example.com");
    Json(json!({
        "token": "live-token-2",
        "user": {
            "id": 2,
            "username": username,
            "email": username,
            "firstName": body["firstName"].as_str().unwrap_or(""),
            "lastName": body["lastName"].as_str().unwrap_or(""),
            "role": body["role"].as_str().unwrap_or("FARMER"),
        }
    }))
    .into_response()
}

async fn public_questions(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state.questions_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_reads {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))).into_response();
    }
    Json(json!([
        {
            "id": 9,
            "title": "Is intercropping worth it for soybean?",
            "farmer": {"firstName": "Live", "lastName": "Farmer"},
            "createdAt": "2026-08-01T10:00:00"
        }
    ]))
    .into_response()
}

async fn schemes(State(state): State<Arc<StubState>>, headers: HeaderMap) -> impl IntoResponse {
    state.schemes_calls.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    state.schemes_auth.lock().unwrap().push(auth);
    if state.fail_reads {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))).into_response();
    }
    Json(json!([
        {"title": "Live Scheme", "benefits": "Support", "isActive": true}
    ]))
    .into_response()
}

async fn pending_experts(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    state.pending_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_reads {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "boom"}))).into_response();
    }
    let approved = state.approved.lock().unwrap();
    let experts: Vec<Value> = [
        json!({"id": 101, "firstName": "Dr. Kavita", "lastName": "Rao", "email": "kavita@example.com", "username": "kavita.rao"}),
        json!({"id": 102, "firstName": "Dr. Ramesh", "lastName": "Iyer", "email": "ramesh@example.com", "username": "ramesh.iyer"}),
    ]
    .into_iter()
    .filter(|e| !approved.contains(&e["id"].as_u64().unwrap()))
    .collect();
    Json(experts).into_response()
}

async fn approve_expert(
    State(state): State<Arc<StubState>>,
    UrlPath(id): UrlPath<u64>,
) -> impl IntoResponse {
    state.approve_calls.fetch_add(1, Ordering::SeqCst);
    state.approved.lock().unwrap().insert(id);
    Json(json!({"status": "approved"}))
}

// ============================================
// Helpers
// ============================================

fn test_config(base_url: String, data_dir: &Path) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url;
    config.api.request_timeout_ms = 2_000;
    config.storage.data_dir = data_dir.to_string_lossy().to_string();
    config
}

/// A URL nothing is listening on. The port is taken from a listener that
/// is immediately dropped.
async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

fn farmer_login() -> LoginInput {
    LoginInput {
        email: "rajesh@example.com".to_string(),
        password: "secret1".to_string(),
        role: Role::Farmer,
    }
}

fn farmer_registration(email: &str) -> RegisterInput {
    RegisterInput {
        name: "Rajesh Patel".to_string(),
        email: email.to_string(),
        password: "secret1".to_string(),
        role: Role::Farmer,
        expertise: None,
        qualifications: None,
        phone_number: None,
        farm_size: Some("2 acres".to_string()),
        primary_crops: None,
    }
}

// ============================================
// Offline fallback
// ============================================

#[tokio::test]
async fn failed_reads_degrade_once_and_stick() {
    let dir = tempdir().unwrap();
    let config = test_config(unreachable_base_url().await, dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    assert_eq!(client.mode().await, RuntimeMode::Live);

    let questions = client.public_questions().await;
    assert_eq!(questions.source, DataSource::Mock);
    assert_eq!(questions.data.len(), 3);
    assert_eq!(client.mode().await, RuntimeMode::Mock);

    // Later reads answer from the dataset too; the mode never resets.
    let schemes = client.schemes().await;
    assert_eq!(schemes.source, DataSource::Mock);
    assert_eq!(schemes.data.len(), 2);

    let weather = client.weather("Pune").await;
    assert_eq!(weather.source, DataSource::Mock);
    assert_eq!(weather.data.city, "Nagpur, MH");
    assert_eq!(client.mode().await, RuntimeMode::Mock);
}

#[tokio::test]
async fn degraded_reads_skip_the_network() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::with_mode(&config, RuntimeMode::Mock).unwrap();

    let questions = client.public_questions().await;
    assert_eq!(questions.source, DataSource::Mock);
    assert_eq!(questions.data.len(), 3);

    let schemes = client.schemes().await;
    assert_eq!(schemes.source, DataSource::Mock);

    // The backend would have answered, but degraded reads never ask it.
    assert_eq!(stub.state.questions_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.state.schemes_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn live_reads_pass_through_normalized() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let questions = client.public_questions().await;
    assert_eq!(questions.source, DataSource::Live);
    assert_eq!(questions.data.len(), 1);
    assert_eq!(questions.data[0].farmer.as_ref().unwrap().full_name(), "Live Farmer");

    let schemes = client.schemes().await;
    assert_eq!(schemes.source, DataSource::Live);
    assert_eq!(schemes.data[0].name, "Live Scheme");
    assert_eq!(schemes.data[0].benefit.as_deref(), Some("Support"));
    assert_eq!(client.mode().await, RuntimeMode::Live);
}

// ============================================
// Write-path asymmetry
// ============================================

#[tokio::test]
async fn writes_attempt_live_even_after_degradation() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::with_mode(&config, RuntimeMode::Mock).unwrap();

    let session = client.login(&farmer_login()).await.unwrap();
    assert_eq!(session.source, DataSource::Live);
    assert_eq!(session.data.token, "live-token-1");
    assert_eq!(stub.state.login_calls.load(Ordering::SeqCst), 1);

    // The live login is stored even though reads are degraded.
    assert_eq!(client.current_session().unwrap().token, "live-token-1");
}

#[tokio::test]
async fn rejected_login_propagates_after_prior_read_degradation() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(StubState {
        fail_reads: true,
        reject_login: true,
        login_role: "FARMER",
        ..StubState::default()
    })
    .await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    // A failing read degrades the client...
    let questions = client.public_questions().await;
    assert_eq!(questions.source, DataSource::Mock);
    assert_eq!(client.mode().await, RuntimeMode::Mock);

    // ...but the login still goes to the backend, and its rejection is
    // surfaced verbatim instead of being papered over with a mock user.
    let err = client.login(&farmer_login()).await.unwrap_err();
    match &err {
        AdvisoryError::Api(ApiError::Api { status, message }) => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected API rejection, got {:?}", other),
    }
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(stub.state.login_calls.load(Ordering::SeqCst), 1);
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn offline_login_fabricates_requested_role() {
    let dir = tempdir().unwrap();
    let config = test_config(unreachable_base_url().await, dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let input = LoginInput {
        email: "neha@example.com".to_string(),
        password: "secret1".to_string(),
        role: Role::Expert,
    };
    let session = client.login(&input).await.unwrap();
    assert_eq!(session.source, DataSource::Mock);
    assert!(session.data.token.starts_with("mock-jwt-token-"));
    assert_eq!(session.data.user.role, Role::Expert);
    assert_eq!(session.data.user.email, "neha@example.com");

    // A write fallback does not flip the read mode.
    assert_eq!(client.mode().await, RuntimeMode::Live);

    client.logout().unwrap();
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn admin_login_rejects_non_admin_accounts() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let err = client
        .admin_login("rajesh@example.com", "secret1")
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisoryError::AccessDenied));
    assert!(client.current_session().is_none());
}

#[tokio::test]
async fn offline_admin_login_fabricates_admin() {
    let dir = tempdir().unwrap();
    let config = test_config(unreachable_base_url().await, dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let session = client
        .admin_login("admin@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(session.source, DataSource::Mock);
    assert_eq!(session.data.user.role, Role::Admin);
}

// ============================================
// Offline registration ledger
// ============================================

#[tokio::test]
async fn duplicate_offline_registration_is_rejected() {
    let dir = tempdir().unwrap();
    let config = test_config(unreachable_base_url().await, dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let first = client
        .register(&farmer_registration("rajesh@example.com"))
        .await
        .unwrap();
    assert_eq!(first.source, DataSource::Mock);
    assert_eq!(first.data.user.first_name, "Rajesh");
    assert_eq!(first.data.user.last_name, "Patel");

    let err = client
        .register(&farmer_registration("rajesh@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AdvisoryError::DuplicateEmail));

    // No session change and no second ledger entry.
    assert_eq!(client.current_session().unwrap(), first.data);
    let store = SessionStore::open(dir.path()).unwrap();
    assert_eq!(store.mock_emails(), vec!["rajesh@example.com"]);

    // A different email still registers.
    let second = client
        .register(&farmer_registration("anita@example.com"))
        .await
        .unwrap();
    assert_eq!(second.source, DataSource::Mock);
    assert_eq!(store.mock_emails().len(), 2);
}

#[tokio::test]
async fn live_registration_skips_the_ledger() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let session = client
        .register(&farmer_registration("rajesh@example.com"))
        .await
        .unwrap();
    assert_eq!(session.source, DataSource::Live);
    assert_eq!(stub.state.register_calls.load(Ordering::SeqCst), 1);

    let store = SessionStore::open(dir.path()).unwrap();
    assert!(store.mock_emails().is_empty());
}

// ============================================
// Bearer credential
// ============================================

#[tokio::test]
async fn bearer_header_follows_the_stored_session() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    // Signed out: no Authorization header at all.
    client.schemes().await;
    // Signed in: the stored token is attached as a bearer credential.
    let store = SessionStore::open(dir.path()).unwrap();
    store
        .set(&Session {
            token: "tok-123".to_string(),
            user: UserProfile {
                id: 1,
                username: "rajesh@example.com".to_string(),
                email: "rajesh@example.com".to_string(),
                first_name: "Rajesh".to_string(),
                last_name: "Patel".to_string(),
                role: Role::Farmer,
            },
        })
        .unwrap();
    client.schemes().await;

    let seen = stub.state.schemes_auth.lock().unwrap().clone();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], None);
    assert_eq!(seen[1].as_deref(), Some("Bearer tok-123"));
}

// ============================================
// Expert approval
// ============================================

#[tokio::test]
async fn live_approval_issues_one_request_and_one_refetch() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let pending = client.pending_experts().await;
    assert_eq!(pending.source, DataSource::Live);
    assert_eq!(pending.data.len(), 2);
    assert_eq!(stub.state.pending_calls.load(Ordering::SeqCst), 1);

    let remaining = client.approve_expert(101, pending.data).await.unwrap();
    assert_eq!(remaining.source, DataSource::Live);
    assert_eq!(remaining.data.len(), 1);
    assert_eq!(remaining.data[0].id, 102);

    assert_eq!(stub.state.approve_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stub.state.pending_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn offline_approval_only_mutates_the_rendered_list() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::with_mode(&config, RuntimeMode::Mock).unwrap();

    let pending = client.pending_experts().await;
    assert_eq!(pending.source, DataSource::Mock);
    assert_eq!(pending.data.len(), 2);

    let remaining = client.approve_expert(101, pending.data).await.unwrap();
    assert_eq!(remaining.source, DataSource::Mock);
    assert_eq!(remaining.data.len(), 1);
    assert_eq!(remaining.data[0].id, 102);

    // Nothing hit the network, and the dataset itself is untouched: the
    // next load shows both experts again.
    assert_eq!(stub.state.pending_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.state.approve_calls.load(Ordering::SeqCst), 0);
    assert_eq!(client.pending_experts().await.data.len(), 2);
}

// ============================================
// Validation short-circuits
// ============================================

#[tokio::test]
async fn invalid_login_input_never_reaches_the_backend() {
    let dir = tempdir().unwrap();
    let stub = Stub::start(default_stub()).await;
    let config = test_config(stub.base_url(), dir.path());
    let client = AdvisoryClient::new(&config).unwrap();

    let input = LoginInput {
        email: "not-an-email".to_string(),
        password: "123".to_string(),
        role: Role::Farmer,
    };
    let err = client.login(&input).await.unwrap_err();
    match err {
        AdvisoryError::Validation(fields) => {
            assert_eq!(fields.len(), 2);
            assert_eq!(fields[0].field, "email");
            assert_eq!(fields[1].field, "password");
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(stub.state.login_calls.load(Ordering::SeqCst), 0);
}
