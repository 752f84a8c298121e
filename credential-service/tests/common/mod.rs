use std::sync::Arc;

use auth::Authenticator;
use auth::AuthorizationMiddleware;
use auth::TokenCodec;
use credential_service::domain::user::service::CredentialGate;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::InMemoryUserRegistry;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TEST_ISSUER: &str = "credential-service";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_codec = Arc::new(TokenCodec::new(TEST_SECRET, TEST_ISSUER));
        let authenticator = Arc::new(Authenticator::new(Arc::clone(&token_codec), None));
        let authorization = Arc::new(AuthorizationMiddleware::new(Arc::clone(&token_codec)));

        let registry = Arc::new(InMemoryUserRegistry::new());
        let credential_gate = Arc::new(CredentialGate::new(registry, authenticator));

        let router = create_router(credential_gate, authorization);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Sign up a user, returning the response
    pub async fn signup(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log a user in, returning the response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Test database helper
///
/// Creates a throwaway database on the server at `DATABASE__URL` and runs the
/// migrations against it.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
}

fn postgres_url() -> String {
    std::env::var("DATABASE__URL").expect("DATABASE__URL must point at a Postgres server")
}

impl TestDb {
    /// Create a new test database with a unique name
    pub async fn new() -> Self {
        let db_name = format!(
            "test_credential_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let postgres_url = postgres_url();
        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE__URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, db_name }
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&postgres_url()).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
