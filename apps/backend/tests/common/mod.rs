//! Common test utilities and fixtures for integration tests.
//!
//! Every TestContext owns a fresh temporary data directory, so tests never
//! share a deck store file.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use tempfile::TempDir;

use espartan_backend::store::JsonFileStore;
use espartan_backend::{app, AppState};

/// Test context holding the data directory and the router under test.
pub struct TestContext {
    pub data_dir: TempDir,
    app: Router,
}

impl TestContext {
    /// Create a context whose store starts from the built-in decks.
    pub fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = AppState::new(JsonFileStore::open(data_dir.path()));
        Self {
            data_dir,
            app: app(state),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }
}

/// Start a session and return the response body.
pub async fn start_session(server: &TestServer, body: Value) -> Value {
    let response = server.post("/api/session").json(&body).await;
    response.assert_status_ok();
    response.json()
}

/// Current session snapshot.
pub async fn current_session(server: &TestServer) -> Value {
    let response = server.get("/api/session").await;
    response.assert_status_ok();
    response.json()
}

pub fn session_id(body: &Value) -> String {
    body["session_id"]
        .as_str()
        .expect("session_id missing")
        .to_string()
}
