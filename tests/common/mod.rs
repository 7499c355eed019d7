#![allow(dead_code)]

use reqwest::Client;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Once,
};

static INIT: Once = Once::new();
static MIGRATIONS_RAN: AtomicBool = AtomicBool::new(false);
static EMAIL_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
        std::env::set_var(
            "JWT_SECRET",
            "integration_test_secret_that_is_at_least_32_characters_long",
        );
        let config = mentorhub::config::jwt::JwtConfig::from_env().unwrap();
        let _ = mentorhub::utils::jwt::init_jwt_config(config);
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
}

impl TestApp {
    pub fn graphql_url(&self) -> String {
        format!("{}/graphql", self.addr)
    }

    /// Execute a GraphQL operation anonymously and return the raw body.
    pub async fn graphql(&self, query: &str, variables: Value) -> Value {
        self.execute(query, variables, None).await
    }

    /// Execute a GraphQL operation with a bearer token.
    pub async fn graphql_as(&self, token: &str, query: &str, variables: Value) -> Value {
        self.execute(query, variables, Some(token)).await
    }

    async fn execute(&self, query: &str, variables: Value, token: Option<&str>) -> Value {
        let mut req = self
            .client
            .post(self.graphql_url())
            .json(&serde_json::json!({ "query": query, "variables": variables }));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.expect("Failed to send GraphQL request");
        assert_eq!(resp.status(), 200, "GraphQL endpoint returned non-200");
        resp.json().await.expect("Failed to parse GraphQL response")
    }
}

pub async fn spawn_app() -> TestApp {
    init_env();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"));

    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    // Run migrations only once globally (using atomic bool for thread safety)
    if !MIGRATIONS_RAN.swap(true, Ordering::SeqCst) {
        mentorhub::migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
    }

    // Clean data tables (reverse dependency order)
    cleanup_tables(&db).await;

    let graphql_schema = mentorhub::schema::build_schema(db.clone());

    let app = axum::Router::new()
        .route("/", axum::routing::get(|| async { "ok" }))
        .merge(mentorhub::routes::create_routes())
        .layer(axum::extract::Extension(db.clone()))
        .layer(axum::extract::Extension(graphql_schema));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
    }
}

async fn cleanup_tables(db: &DatabaseConnection) {
    let tables = ["refresh_tokens", "logs", "requests", "users"];

    for table in tables {
        let sql = format!("TRUNCATE TABLE {} CASCADE", table);
        let _ = db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await;
    }
}

const REGISTER_MUTATION: &str = r#"
    mutation Register($email: String!, $firstName: String!, $isMentor: Boolean) {
        registerUser(
            email: $email,
            password: "test_password_123",
            firstName: $firstName,
            lastName: "Tester",
            isMentor: $isMentor
        ) {
            user { id email isMentor }
            token
            refreshToken
        }
    }
"#;

/// Register a user with a unique email and return (user_id, access_token).
pub async fn register_user(app: &TestApp, prefix: &str) -> (i32, String) {
    register(app, prefix, false).await
}

/// Register a user flagged as mentor and return (user_id, access_token).
pub async fn register_mentor(app: &TestApp, prefix: &str) -> (i32, String) {
    register(app, prefix, true).await
}

async fn register(app: &TestApp, prefix: &str, is_mentor: bool) -> (i32, String) {
    let counter = EMAIL_COUNTER.fetch_add(1, Ordering::SeqCst);
    let email = format!("{}_{}@test.com", prefix, counter);

    let body = app
        .graphql(
            REGISTER_MUTATION,
            serde_json::json!({
                "email": email,
                "firstName": prefix,
                "isMentor": is_mentor,
            }),
        )
        .await;

    assert!(
        body["errors"].is_null(),
        "Failed to register '{}': {}",
        email,
        body
    );

    let user_id = body["data"]["registerUser"]["user"]["id"]
        .as_i64()
        .expect("Response missing user id") as i32;
    let token = body["data"]["registerUser"]["token"]
        .as_str()
        .expect("Response missing token")
        .to_string();
    (user_id, token)
}

/// Open a request from mentee to mentor and return its id.
pub async fn create_request(app: &TestApp, mentor_id: i32, mentee_id: i32, question: &str) -> i32 {
    let body = app
        .graphql(
            r#"
            mutation Create($mentorId: Int!, $menteeId: Int!, $question: String!) {
                createRequest(mentorId: $mentorId, menteeId: $menteeId, question: $question) {
                    request { id status }
                }
            }
            "#,
            serde_json::json!({
                "mentorId": mentor_id,
                "menteeId": mentee_id,
                "question": question,
            }),
        )
        .await;

    assert!(body["errors"].is_null(), "Failed to create request: {}", body);
    body["data"]["createRequest"]["request"]["id"]
        .as_i64()
        .expect("Response missing request id") as i32
}

/// First error message from a GraphQL response body.
pub fn first_error(body: &Value) -> &str {
    body["errors"][0]["message"]
        .as_str()
        .unwrap_or_else(|| panic!("Expected an error in response: {}", body))
}
