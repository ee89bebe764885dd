//! Test helpers: build AppState and router against temp directories.
//!
//! Run with: `cargo test -p lumen-api`.

pub mod fixtures;

use axum_test::TestServer;
use lumen_api::setup::routes;
use lumen_api::state::AppState;
use lumen_core::Config;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application: server plus the temp dir that owns its storage.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.environment = "test".to_string();
    config.cors_origins = vec!["*".to_string()];
    config.upload_dir = temp_dir.path().join("uploads").to_string_lossy().into_owned();
    config.processed_dir = temp_dir
        .path()
        .join("processed")
        .to_string_lossy()
        .into_owned();
    config
}

/// Setup a test app with default configuration and isolated storage.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Setup a test app, letting the caller tweak the config first.
pub async fn setup_test_app_with(adjust: impl FnOnce(&mut Config)) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = test_config(&temp_dir);
    adjust(&mut config);

    let state = Arc::new(
        AppState::new(config.clone())
            .await
            .expect("Failed to build app state"),
    );
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}
