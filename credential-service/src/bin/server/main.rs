use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::AuthorizationMiddleware;
use auth::TokenCodec;
use credential_service::config::Config;
use credential_service::domain::user::ports::CredentialGatePort;
use credential_service::domain::user::service::CredentialGate;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryUserRegistry;
use credential_service::outbound::repositories::PostgresUserRegistry;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credential_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "credential-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        persistence = if config.database.url.is_some() { "postgresql" } else { "memory" },
        jwt_issuer = %config.jwt.issuer,
        jwt_expiration_hours = ?config.jwt.expiration_hours,
        "Configuration loaded"
    );
    if config.jwt.expiration_hours.is_none() {
        tracing::warn!("jwt.expiration_hours is not set, issued tokens never expire");
    }

    let token_codec = Arc::new(TokenCodec::new(
        config.jwt.secret.as_bytes(),
        config.jwt.issuer.clone(),
    ));
    let authenticator = Arc::new(Authenticator::new(
        Arc::clone(&token_codec),
        config.jwt.expiration_hours,
    ));
    let authorization = Arc::new(AuthorizationMiddleware::new(Arc::clone(&token_codec)));

    let credential_gate: Arc<dyn CredentialGatePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let registry = Arc::new(PostgresUserRegistry::new(pg_pool));
            Arc::new(CredentialGate::new(registry, Arc::clone(&authenticator)))
        }
        None => {
            tracing::warn!("No database.url configured, users are kept in memory");
            let registry = Arc::new(InMemoryUserRegistry::new());
            Arc::new(CredentialGate::new(registry, Arc::clone(&authenticator)))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_gate, authorization);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
