/// Common test utilities and fixtures
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use roster_core::UserStore;
use roster_server::{api, services::SnapshotExporter, state::AppState};
use roster_storage::SqliteUserStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test application with its backing database and snapshot target
pub struct TestApp {
    pub router: Router,
    pub export_path: PathBuf,
    _temp_dir: TempDir,
}

/// Create a test app whose snapshot lands inside the temp directory
pub async fn create_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let export_path = temp_dir.path().join("users.csv");
    build_app(temp_dir, export_path).await
}

/// Create a test app whose snapshot target cannot be written
///
/// The export path points into a directory that does not exist, so every
/// resync fails; mutations must still succeed.
pub async fn create_test_app_with_broken_export() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let export_path = temp_dir.path().join("missing").join("users.csv");
    build_app(temp_dir, export_path).await
}

async fn build_app(temp_dir: TempDir, export_path: PathBuf) -> TestApp {
    let db_path = temp_dir.path().join("test.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let pool = roster_storage::create_pool(&db_url)
        .await
        .expect("Failed to create pool");
    roster_storage::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let store: Arc<dyn UserStore> = Arc::new(SqliteUserStore::new(pool));
    let exporter = Arc::new(SnapshotExporter::new(export_path.clone()));

    let state = AppState::new(store, exporter);

    // Build router with all routes
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::replace_user))
        .route("/users/:id", patch(api::users::patch_user))
        .route("/users/:id", delete(api::users::delete_user));

    let router = Router::new()
        .route("/", get(api::home::welcome))
        .nest("/api", api_routes)
        .with_state(state);

    TestApp {
        router,
        export_path,
        _temp_dir: temp_dir,
    }
}
