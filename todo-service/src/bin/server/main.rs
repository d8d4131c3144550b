use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use todo_service::config::Config;
use todo_service::domain::todo::service::TodoService;
use todo_service::domain::user::service::UserService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::PostgresTodoRepository;
use todo_service::outbound::repositories::PostgresUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    ));

    let user_service = Arc::new(UserService::new(
        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
        authenticator,
    ));
    let todo_service = Arc::new(TodoService::new(Arc::new(PostgresTodoRepository::new(
        pg_pool,
    ))));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, todo_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
