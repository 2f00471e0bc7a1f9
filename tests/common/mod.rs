use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use docverify::config::Config;

/// A running test server instance with a dedicated test database and a
/// scratch upload directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn signup(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: &str,
    ) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/users/signup"))
            .json(&json!({
                "email": email,
                "username": username,
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("signup request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/users/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Sign up a user with the given role and return a bearer token.
    pub async fn signup_and_login(&self, email: &str, username: &str, role: &str) -> String {
        let (body, status) = self.signup(email, username, "password123", role).await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");
        let (body, status) = self.login(email, "password123").await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn create_document_type(&self, token: &str, name: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/document-types"))
            .bearer_auth(token)
            .json(&json!({ "name": name, "description": "test type" }))
            .send()
            .await
            .expect("create document type failed");
        assert_eq!(resp.status(), StatusCode::OK, "create document type non-200");
        resp.json().await.unwrap()
    }

    /// Upload a small text file against a document type.
    pub async fn upload_document(
        &self,
        token: &str,
        title: &str,
        document_type_id: &str,
    ) -> (Value, StatusCode) {
        let part = reqwest::multipart::Part::bytes(b"hello world".to_vec())
            .file_name("hello.txt")
            .mime_str("text/plain")
            .unwrap();
        let form = reqwest::multipart::Form::new()
            .text("title", title.to_string())
            .text("document_type_id", document_type_id.to_string())
            .part("file", part);

        let resp = self
            .client
            .post(self.url("/documents/upload"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .expect("upload request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn patch_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("patch request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// Spawn a test app with a fresh temporary database and upload directory.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let db_name = format!(
        "docverify_test_{}",
        Uuid::now_v7().to_string().replace('-', "")
    );

    // Connect to default postgres DB to create test DB
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let upload_dir = std::env::temp_dir().join(&db_name);

    let config = Config {
        database_url: test_url,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        token_expiry_secs: 7200,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        upload_dir: upload_dir.clone(),
        max_upload_size: 1_048_576,
        log_level: "warn".to_string(),
    };

    let app = docverify::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
        upload_dir,
    }
}

/// Drop the test database and upload directory after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    let upload_dir = app.upload_dir.clone();
    app.pool.close().await;

    let _ = tokio::fs::remove_dir_all(&upload_dir).await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.clone());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url)
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
