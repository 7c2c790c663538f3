/// Roster Server - user directory HTTP service
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use clap::{Parser, Subcommand};
use roster_core::UserStore;
use roster_server::{api, config::ServerConfig, services::SnapshotExporter, state::AppState};
use roster_storage::SqliteUserStore;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster user directory server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Provision the database schema and exit
    InitDb,
    /// List all users
    ListUsers,
    /// Write the CSV snapshot once and exit
    Export,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::InitDb => {
            init_db().await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
        Commands::Export => {
            export().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Roster Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;
    let store: Arc<dyn UserStore> = Arc::new(SqliteUserStore::new(pool));
    tracing::info!("Database connected");

    // Initialize snapshot exporter
    let exporter = SnapshotExporter::new(config.storage.export_path.clone());
    exporter.initialize().await?;
    let exporter = Arc::new(exporter);
    tracing::info!("Snapshot exporter initialized");

    // Build application state
    let app_state = AppState::new(store, exporter);

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::replace_user))
        .route("/users/:id", patch(api::users::patch_user))
        .route("/users/:id", delete(api::users::delete_user));

    Router::new()
        .route("/", get(api::home::welcome))
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn init_db() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;

    println!("Database created successfully.");

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;

    let users = roster_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} <{}>", user.id, user.name, user.email);
    }

    Ok(())
}

async fn export() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = roster_storage::create_pool(&config.storage.database_url).await?;
    roster_storage::run_migrations(&pool).await?;

    let users = roster_storage::users::get_all(&pool).await?;

    let exporter = SnapshotExporter::new(config.storage.export_path.clone());
    exporter.initialize().await?;
    exporter.resync(&users).await?;

    println!(
        "Exported {} users to {}",
        users.len(),
        config.storage.export_path.display()
    );

    Ok(())
}
