//! REST server over a filesystem record store.

mod error;
mod routes;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{Method, header::CONTENT_TYPE};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use applicants_core::RecordStore;
use applicants_file::FileStore;

use crate::config::ServerConfig;

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

/// Build the application router.
///
/// Avatar images under `images_dir` are served at `/images`.
pub fn router(store: Arc<dyn RecordStore>, images_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let collection = get(routes::list_applicants).post(routes::create_applicant);
    let record = get(routes::get_applicant)
        .put(routes::update_applicant)
        .delete(routes::delete_applicant);

    Router::new()
        .route("/applicants", collection.clone())
        .route("/applicants/", collection)
        .route("/applicants/{id}", record)
        .nest_service("/images", ServeDir::new(images_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(AppState { store }))
}

pub async fn run(config: ServerConfig) -> Result<()> {
    info!(data_dir = %config.data_dir.display(), "Opening file store");
    let store = FileStore::new(&config.data_dir);

    std::fs::create_dir_all(&config.images_dir).with_context(|| {
        format!(
            "Failed to create images directory {}",
            config.images_dir.display()
        )
    })?;

    let app = router(Arc::new(store), &config.images_dir);

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    info!(address = %config.addr, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir) -> Router {
        let store = FileStore::new(dir.path());
        router(Arc::new(store.clone()), &store.images_dir())
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn jim() -> Value {
        json!({
            "first_name": "Jim",
            "last_name": "Halpert",
            "email": "jim.halpert@dunder-mifflin.com",
            "position": "Salesman"
        })
    }

    #[tokio::test]
    async fn create_then_list() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, created) = call(&app, "POST", "/applicants", Some(jim())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["applicant_id"], 1);
        assert_eq!(created["first_name"], "Jim");

        let (status, listed) = call(&app, "GET", "/applicants/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert!(listed[0].get("liked").is_none());
    }

    #[tokio::test]
    async fn get_missing_is_null() {
        let dir = TempDir::new().unwrap();
        let (status, body) = call(&app(&dir), "GET", "/applicants/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn update_and_delete_messages() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        call(&app, "POST", "/applicants", Some(jim())).await;

        let (status, body) = call(
            &app,
            "PUT",
            "/applicants/1",
            Some(json!({"position": "Co-Manager"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(routes::UPDATED));

        let (_, record) = call(&app, "GET", "/applicants/1", None).await;
        assert_eq!(record["position"], "Co-Manager");
        assert_eq!(record["last_name"], "Halpert");

        let (status, body) = call(&app, "DELETE", "/applicants/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(routes::DELETED));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, body) = call(&app, "DELETE", "/applicants/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NotFound");

        let (status, _) = call(
            &app,
            "PUT",
            "/applicants/9",
            Some(json!({"email": "nobody@dunder-mifflin.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_requests_are_invalid() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, body) = call(&app, "GET", "/applicants/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidRequest");

        let (status, body) = call(&app, "POST", "/applicants", Some(json!([1, 2]))).await;
        assert!(status.is_client_error());
        assert_eq!(body["error"], "InvalidRequest");
    }

    #[tokio::test]
    async fn body_errors_are_400_or_422() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let request = Request::builder()
            .method("POST")
            .uri("/applicants")
            .body(Body::from(jim().to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, _) = call(&app, "POST", "/applicants", Some(json!({"first_name": 7}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn corrupt_store_data_is_a_server_error() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);
        call(&app, "POST", "/applicants", Some(jim())).await;

        std::fs::write(dir.path().join("applicants").join("1.json"), "{not json").unwrap();

        let (status, body) = call(&app, "GET", "/applicants/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "InternalError");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let dir = TempDir::new().unwrap();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/applicants")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "PUT")
            .body(Body::empty())
            .unwrap();

        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn serves_images() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::create_dir_all(store.images_dir()).unwrap();
        std::fs::write(store.images_dir().join("jim.png"), b"png").unwrap();

        let request = Request::builder()
            .uri("/images/jim.png")
            .body(Body::empty())
            .unwrap();
        let response = app(&dir).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
