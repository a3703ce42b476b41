//! Test helpers: build the router over a temporary local storage root.

pub mod fixtures;

use axum_test::TestServer;
use imgpost_api::setup::initialize_app;
use imgpost_core::Config;
use std::path::Path;
use tempfile::TempDir;

/// Test application: server plus the storage root it writes into.
pub struct TestApp {
    pub server: TestServer,
    pub storage_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage_root(&self) -> &Path {
        self.storage_dir.path()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let storage_dir = tempfile::tempdir().unwrap();
    let mut config = Config {
        local_storage_path: storage_dir.path().to_path_buf(),
        avatar_size: 64,
        preview_max_width: 80,
        preview_max_height: 60,
        ..Config::default()
    };
    configure(&mut config);

    let (_state, router) = initialize_app(config).await.unwrap();
    let server = TestServer::new(router).unwrap();

    TestApp {
        server,
        storage_dir,
    }
}
