//! Router tests against a live Postgres.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p api -- --ignored

use api::{router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use db::pool::{create_pool, run_migrations};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

async fn test_app() -> Router {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url, 5).await.expect("pool creation failed");
    run_migrations(&pool).await.expect("migrations failed");
    router(AppState::new(pool))
}

fn unique(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_str(&text(response).await).unwrap()
}

fn keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    keys
}

async fn create_pizza(app: &Router) -> String {
    let id = unique("pz");
    let response = call(
        app,
        Method::POST,
        "/pizzas",
        Some(json!({
            "pizza_type_id": id,
            "name": "Margherita",
            "size": "Medium",
            "base_price": 8.99,
            "description": "Tomato, mozzarella, basil",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}

async fn create_topping(app: &Router) -> String {
    let id = unique("tp");
    let response = call(
        app,
        Method::POST,
        "/toppings",
        Some(json!({ "topping_id": id, "name": "Basil", "price": 1.5 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    id
}

async fn create_invoice(app: &Router) -> i64 {
    let response = call(
        app,
        Method::POST,
        "/invoices",
        Some(json!({ "customer_name": "Ann" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["invoice_id"].as_i64().unwrap()
}

async fn add_item(app: &Router, invoice_id: i64, item_id: &str, quantity: i32, price: f64) -> i64 {
    let response = call(
        app,
        Method::POST,
        &format!("/invoices/{invoice_id}/items"),
        Some(json!({ "item_id": item_id, "quantity": quantity, "unit_price": price })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await["invoice_item_id"].as_i64().unwrap()
}

async fn assert_deleted(response: Response, message: &str) {
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "message": message }));
}

#[tokio::test]
#[ignore = "requires database"]
async fn link_topping_answers_created_with_pair() {
    let app = test_app().await;
    let pizza = create_pizza(&app).await;
    let topping = create_topping(&app).await;

    let response = call(
        &app,
        Method::POST,
        &format!("/pizzas/{pizza}/toppings"),
        Some(json!({ "topping_id": topping })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    assert_eq!(keys(&body), ["pizza_type_id", "topping_id"]);
    assert_eq!(body["pizza_type_id"], pizza.as_str());
    assert_eq!(body["topping_id"], topping.as_str());

    let names = json_body(call(&app, Method::GET, &format!("/pizzas/{pizza}/toppings"), None).await).await;
    assert_eq!(names, json!(["Basil"]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn link_to_unknown_rows_is_plain_text_bad_request() {
    let app = test_app().await;
    let pizza = create_pizza(&app).await;

    let response = call(
        &app,
        Method::POST,
        &format!("/pizzas/{pizza}/toppings"),
        Some(json!({ "topping_id": unique("missing") })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(text(response).await, "Topping not found");

    let topping = create_topping(&app).await;
    let response = call(
        &app,
        Method::POST,
        &format!("/pizzas/{}/toppings", unique("missing")),
        Some(json!({ "topping_id": topping })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(text(response).await, "Pizza type not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn deletes_answer_with_resource_message() {
    let app = test_app().await;

    let pizza = create_pizza(&app).await;
    let response = call(&app, Method::DELETE, &format!("/pizzas/{pizza}"), None).await;
    assert_deleted(response, "Pizza type deleted successfully").await;

    let topping = create_topping(&app).await;
    let response = call(&app, Method::DELETE, &format!("/toppings/{topping}"), None).await;
    assert_deleted(response, "Topping deleted successfully").await;

    let beverage = unique("bv");
    let response = call(
        &app,
        Method::POST,
        "/beverages",
        Some(json!({ "beverage_id": beverage, "name": "Cola", "price": 2 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = call(&app, Method::DELETE, &format!("/beverages/{beverage}"), None).await;
    assert_deleted(response, "Beverage deleted successfully").await;

    let invoice = create_invoice(&app).await;
    let item = add_item(&app, invoice, "PZ01", 1, 5.0).await;
    let response = call(&app, Method::DELETE, &format!("/invoices/items/{item}"), None).await;
    assert_deleted(response, "Invoice item deleted successfully").await;

    let response = call(&app, Method::DELETE, &format!("/invoices/{invoice}"), None).await;
    assert_deleted(response, "Invoice deleted successfully").await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn invoice_update_refreshes_totals_and_print_envelope() {
    let app = test_app().await;
    let invoice = create_invoice(&app).await;
    add_item(&app, invoice, "PZ01", 2, 5.0).await;
    add_item(&app, invoice, "TP01", 2, 1.5).await;

    // items alone leave the stored totals stale
    let stale = json_body(call(&app, Method::GET, &format!("/invoices/{invoice}/print"), None).await).await;
    assert_eq!(stale["invoice"]["total"], 0.0);

    let response = call(
        &app,
        Method::PUT,
        &format!("/invoices/{invoice}"),
        Some(json!({})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["customer_name"], "Ann");
    assert_eq!(updated["subtotal"], 13.0);
    assert_eq!(updated["tax"], 1.3);
    assert_eq!(updated["total"], 14.3);

    let response = call(&app, Method::GET, &format!("/invoices/{invoice}/print"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let printable = json_body(response).await;
    assert_eq!(keys(&printable), ["invoice", "invoice_items"]);
    assert_eq!(
        keys(&printable["invoice"]),
        ["invoice_id", "subtotal", "tax", "total"]
    );
    assert_eq!(printable["invoice"]["total"], 14.3);

    let lines = printable["invoice_items"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        keys(&lines[0]),
        ["invoice_id", "invoice_item_id", "item_id", "quantity", "unit_price"]
    );
}
