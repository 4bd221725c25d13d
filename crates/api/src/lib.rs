//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET/POST   /pizzas,   PUT/DELETE /pizzas/{id},   GET/POST /pizzas/{id}/toppings
//!   GET/POST   /toppings, PUT/DELETE /toppings/{id}
//!   GET/POST   /beverages, PUT/DELETE /beverages/{id}
//!   GET/POST   /invoices, PUT/DELETE /invoices/{id}, GET /invoices/{id}/print
//!   GET/POST   /invoices/{id}/items, PUT/DELETE /invoices/items/{item_id}

pub mod error;
pub mod extract;
pub mod handlers;

use axum::{
    http::Method,
    routing::{get, put},
    Router,
};
use db::DbPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use handlers::{beverages, invoice_items, invoices, pizzas, toppings};

pub use error::{ApiError, ApiResult};

/// State shared by every handler: the one database pool of the process.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Build the application router with all routes.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/pizzas", get(pizzas::list).post(pizzas::create))
        .route("/pizzas/{pizza_type_id}", put(pizzas::update).delete(pizzas::delete))
        .route(
            "/pizzas/{pizza_type_id}/toppings",
            get(pizzas::list_toppings).post(pizzas::link_topping),
        )
        .route("/toppings", get(toppings::list).post(toppings::create))
        .route("/toppings/{topping_id}", put(toppings::update).delete(toppings::delete))
        .route("/beverages", get(beverages::list).post(beverages::create))
        .route(
            "/beverages/{beverage_id}",
            put(beverages::update).delete(beverages::delete),
        )
        .route("/invoices", get(invoices::list).post(invoices::create))
        .route("/invoices/{invoice_id}", put(invoices::update).delete(invoices::delete))
        .route("/invoices/{invoice_id}/print", get(invoices::print))
        .route(
            "/invoices/{invoice_id}/items",
            get(invoice_items::list).post(invoice_items::create),
        )
        .route(
            "/invoices/items/{invoice_item_id}",
            put(invoice_items::update).delete(invoice_items::delete),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve the API on `bind` until Ctrl+C or SIGTERM.
pub async fn serve(bind: &str, pool: DbPool) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(pool)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown"),
        _ = terminate => info!("Received SIGTERM, starting shutdown"),
    }
}

#[cfg(test)]
mod tests {
    //! Router behaviour that is decided before any query runs. The pool is
    //! lazy and never connects.

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn app() -> Router {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://billing@localhost/billing_unused")
            .unwrap();
        router(AppState::new(pool))
    }

    async fn send(request: Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn json_request(method: Method, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn root_returns_welcome_message() {
        let response = send(Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["message"], "Welcome to the Pizza Shop Billing API");
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = send(json_request(Method::POST, "/pizzas", "{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }

    #[tokio::test]
    async fn create_without_identifier_is_bad_request() {
        let response = send(json_request(Method::POST, "/toppings", r#"{"name": "Basil"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("topping_id"));
    }

    #[tokio::test]
    async fn wrong_field_type_is_bad_request() {
        let response = send(json_request(
            Method::PUT,
            "/invoices/items/4",
            r#"{"quantity": "two"}"#,
        ))
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn body_without_content_type_is_still_decoded() {
        // well-formed JSON with no header reaches the decoder, which names the missing field
        let request = Request::builder()
            .method(Method::POST)
            .uri("/beverages")
            .body(Body::from(r#"{"name": "Cola", "price": 2}"#))
            .unwrap();
        let response = send(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_text(response).await;
        assert!(body.contains("missing field `beverage_id`"), "{body}");
        assert!(!body.contains("Content-Type"));
    }

    #[tokio::test]
    async fn non_numeric_invoice_id_is_bad_request() {
        let response = send(json_request(Method::PUT, "/invoices/abc", "{}")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let response = send(json_request(Method::PATCH, "/beverages/BV01", "{}")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/pizzas")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
            .body(Body::empty())
            .unwrap();
        let response = send(request).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap();
        assert!(methods.contains("PUT"));
        assert!(methods.contains("DELETE"));
    }
}
