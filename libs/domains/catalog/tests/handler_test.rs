//! Handler tests for the catalog domain
//!
//! These run the router against the in-memory store and check:
//! - Request deserialization (camelCase JSON → Rust structs)
//! - Response serialization and status codes
//! - Both error body shapes

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(CatalogService::new(InMemoryProductStore::new(), ProductMapper))
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

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

fn widget(name: &str, category: &str, inventory: i32) -> Value {
    json!({
        "name": name,
        "description": "A useful widget",
        "price": 9.99,
        "category": category,
        "inventoryCount": inventory,
        "imageUrl": "https://cdn.example.com/widget.png"
    })
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(widget("Widget", "Tools", 3).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let product: ProductResponse = json_body(response.into_body()).await;
    assert_eq!(product.id, 1);
    assert_eq!(product.name, "Widget");
    assert_eq!(product.inventory_count, 3);
    assert_eq!(product.image_url.as_deref(), Some("https://cdn.example.com/widget.png"));
    assert_eq!(product.created_at, product.updated_at);
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = app();

    let (status, created) = send(&app, "POST", "/", Some(widget("Widget", "Tools", 3))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], json!(9.99));
    assert_eq!(created["inventoryCount"], 3);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut replacement = widget("Widget Pro", "Tools", 5);
    replacement["price"] = json!(12.5);
    let (status, updated) = send(&app, "PUT", &format!("/{id}"), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Widget Pro");
    assert_eq!(updated["price"], json!(12.5));
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, stocked) = send(&app, "PATCH", &format!("/{id}/inventory?quantity=0"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stocked["inventoryCount"], 0);
    assert_eq!(stocked["name"], "Widget Pro");

    let (status, body) = send(&app, "DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_validates_input() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({
            "name": "  ",
            "price": -1,
            "category": "Tools",
            "inventoryCount": -5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": "Product name is required",
            "price": "Price must be greater than or equal to 0",
            "inventoryCount": "Inventory count must be at least 0"
        })
    );

    let (_, page) = send(&app, "GET", "/", None).await;
    assert_eq!(page["totalElements"], 0);
}

#[tokio::test]
async fn test_missing_price_is_a_field_error() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/",
        Some(json!({"name": "Widget", "category": "Tools", "inventoryCount": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["price"], "Price is required");
}

#[tokio::test]
async fn test_price_keeps_digits_beyond_f64() {
    let app = app();
    let request: Value = serde_json::from_str(
        r#"{"name": "Vault", "price": 98765432109876543.21, "category": "Safes", "inventoryCount": 1}"#,
    )
    .unwrap();

    let (status, created) = send(&app, "POST", "/", Some(request)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"].to_string(), "98765432109876543.21");

    let id = created["id"].as_i64().unwrap();
    let (_, fetched) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(fetched["price"].to_string(), "98765432109876543.21");
}

#[tokio::test]
async fn test_price_that_does_not_fit_the_column_is_a_field_error() {
    let app = app();

    for (price, message) in [
        (json!(9.999), "Price must have at most 2 decimal places"),
        (json!("100000000000000000"), "Price must be less than 100000000000000000"),
    ] {
        let mut request = widget("Widget", "Tools", 1);
        request["price"] = price;

        let (status, body) = send(&app, "POST", "/", Some(request)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["price"], message);
    }

    let (_, page) = send(&app, "GET", "/", None).await;
    assert_eq!(page["totalElements"], 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_get_missing_product_returns_404() {
    let app = app();

    let (status, body) = send(&app, "GET", "/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"status": 404, "message": "Product not found with id: 999"})
    );
}

#[tokio::test]
async fn test_update_missing_product_returns_404() {
    let app = app();

    let (status, body) = send(&app, "PUT", "/42", Some(widget("Widget", "Tools", 1))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found with id: 42");
}

#[tokio::test]
async fn test_update_validates_before_lookup() {
    let app = app();

    let (status, body) = send(&app, "PUT", "/42", Some(widget("", "Tools", 1))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], "Product name is required");
}

#[tokio::test]
async fn test_delete_missing_product_returns_404() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/7", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = app();

    let (status, body) = send(&app, "GET", "/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_negative_inventory_is_rejected() {
    let app = app();
    let (_, created) = send(&app, "POST", "/", Some(widget("Widget", "Tools", 3))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) =
        send(&app, "PATCH", &format!("/{id}/inventory?quantity=-1"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["quantity"], "Inventory quantity must be at least 0");

    let (_, fetched) = send(&app, "GET", &format!("/{id}"), None).await;
    assert_eq!(fetched["inventoryCount"], 3);
}

#[tokio::test]
async fn test_inventory_requires_quantity() {
    let app = app();
    send(&app, "POST", "/", Some(widget("Widget", "Tools", 3))).await;

    let (status, _) = send(&app, "PATCH", "/1/inventory", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products_pages_and_sorts() {
    let app = app();
    for (name, price) in [("Bolt", 0.5), ("Anvil", 120.0), ("Clamp", 14.25)] {
        let mut body = widget(name, "Tools", 1);
        body["price"] = json!(price);
        send(&app, "POST", "/", Some(body)).await;
    }

    let (status, page) = send(&app, "GET", "/?page=0&size=2&sortBy=price&direction=DESC", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["numberOfElements"], 2);
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], false);
    assert_eq!(page["content"][0]["name"], "Anvil");
    assert_eq!(page["content"][1]["name"], "Clamp");

    let (_, page) = send(&app, "GET", "/?page=1&size=2&sortBy=price&direction=desc", None).await;
    assert_eq!(page["content"][0]["name"], "Bolt");
    assert_eq!(page["last"], true);

    let (_, page) = send(&app, "GET", "/?sortBy=name", None).await;
    assert_eq!(page["size"], 10);
    assert_eq!(page["content"][0]["name"], "Anvil");
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let app = app();
    send(&app, "POST", "/", Some(widget("Widget", "Tools", 1))).await;

    let (status, page) = send(&app, "GET", "/?page=5", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["empty"], true);
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["number"], 5);
}

#[tokio::test]
async fn test_largest_page_index_is_an_empty_last_page() {
    let app = app();
    send(&app, "POST", "/", Some(widget("Widget", "Tools", 1))).await;

    let (status, page) = send(&app, "GET", "/?page=18446744073709551615", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"], json!([]));
    assert_eq!(page["last"], true);
    assert_eq!(page["number"], json!(u64::MAX));
}

#[tokio::test]
async fn test_page_size_out_of_range_is_rejected() {
    let app = app();

    for uri in ["/?size=0", "/?size=1001", "/available?size=0", "/search?name=a&size=5000"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["size"], "Page size must be between 1 and 1000", "{uri}");
    }
}

#[tokio::test]
async fn test_list_by_category_is_exact() {
    let app = app();
    send(&app, "POST", "/", Some(widget("Hammer", "Tools", 1))).await;
    send(&app, "POST", "/", Some(widget("Shovel", "Garden", 1))).await;
    send(&app, "POST", "/", Some(widget("Wrench", "tools", 1))).await;

    let (status, page) = send(&app, "GET", "/category/Tools", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["name"], "Hammer");
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let app = app();
    send(&app, "POST", "/", Some(widget("Blue Widget", "Tools", 1))).await;
    send(&app, "POST", "/", Some(widget("widget mini", "Tools", 1))).await;
    send(&app, "POST", "/", Some(widget("Gadget", "Tools", 1))).await;

    let (status, page) = send(&app, "GET", "/search?name=WIDGET", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 2);

    let (_, page) = send(&app, "GET", "/search", None).await;
    assert_eq!(page["totalElements"], 3);
}

#[tokio::test]
async fn test_available_excludes_out_of_stock() {
    let app = app();
    send(&app, "POST", "/", Some(widget("In stock", "Tools", 4))).await;
    send(&app, "POST", "/", Some(widget("Sold out", "Tools", 0))).await;

    let (status, page) = send(&app, "GET", "/available", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 1);
    assert_eq!(page["content"][0]["name"], "In stock");
}
