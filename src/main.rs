use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use userdeck_api::api::handlers::{router, AppState};
use userdeck_api::application::UserUseCase;
use userdeck_api::config::Config;
use userdeck_api::domain::notifications::LoggingNotifier;
use userdeck_api::domain::user::UserDomainService;
use userdeck_api::infrastructure::repositories::SqliteUserRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env();

    // Connect to the embedded database, creating the file on first run
    tracing::info!(database_url = %config.database_url, "Connecting to database...");
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .expect("Failed to connect to database");

    SqliteUserRepository::migrate(&pool)
        .await
        .expect("Failed to create schema");

    tracing::info!("Database connected successfully");

    // Composition root: build the singletons once, inject everywhere
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = UserDomainService::new(Arc::new(LoggingNotifier::new()));
    let use_case = Arc::new(UserUseCase::new(repository, service));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = router(AppState { use_case })
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
