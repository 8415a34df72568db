use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

mod common;

macro_rules! app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($test_db.repo()))
                .configure(storefront::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let test_db = common::TestDb::new("test_health.db");
    let app = app!(test_db);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_product_lifecycle() {
    let test_db = common::TestDb::new("test_product_lifecycle.db");
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "name": "Merino scarf",
            "price": 42.0,
            "category": "scarf",
            "colors": "red, grey",
            "featured": "true",
            "images": [{"url": "/uploads/scarf.jpg"}]
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["featured"], false);
    assert_eq!(created["colors"], json!(["red", "grey"]));
    assert_eq!(created["images"][0]["altText"], "Merino scarf");

    let req = test::TestRequest::get()
        .uri("/api/products?category=scarf&minPrice=abc&limit=5")
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["totalPages"], 1);
    assert_eq!(page["currentPage"], 1);
    assert_eq!(page["products"][0]["name"], "Merino scarf");

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{id}"))
        .set_json(json!({"name": "Merino scarf", "price": 40.0, "featured": "true"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["featured"], true);
    assert_eq!(updated["images"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/products/featured")
        .to_request();
    let featured: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(featured.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product removed");

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product not found");
}

#[actix_web::test]
async fn test_invalid_product_is_bad_request() {
    let test_db = common::TestDb::new("test_invalid_product_is_bad_request.db");
    let app = app!(test_db);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Hat", "price": -3.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_contact_flow_and_dashboard() {
    let test_db = common::TestDb::new("test_contact_flow_and_dashboard.db");
    let app = app!(test_db);
    let contact = json!({"username": "Jane", "phone": "555-0100", "country": "Canada"});

    let req = test::TestRequest::post()
        .uri("/api/chat-users")
        .set_json(&contact)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Value = test::read_body_json(resp).await;
    assert_eq!(first["message"], "Thank you! We will contact you soon.");

    let req = test::TestRequest::post()
        .uri("/api/chat-users")
        .set_json(&contact)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let second: Value = test::read_body_json(resp).await;
    assert_eq!(second["message"], "Welcome back! We will contact you soon.");
    assert_eq!(second["user"]["id"], first["user"]["id"]);

    let req = test::TestRequest::post()
        .uri("/api/chat-users")
        .set_json(json!({"username": "Jane"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get()
        .uri("/api/chat-users?status=all")
        .to_request();
    let users: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users["total"], 1);
    assert_eq!(users["users"][0]["status"], "active");

    let req = test::TestRequest::put()
        .uri("/api/chat-users/999")
        .set_json(json!({"status": "blocked"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User not found");

    let req = test::TestRequest::get().uri("/api/admin/stats").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalProducts"], 0);
    assert_eq!(stats["totalChatUsers"], 1);
    assert_eq!(stats["totalValue"], 0.0);
    assert_eq!(stats["topCountries"][0]["country"], "Canada");

    let req = test::TestRequest::get()
        .uri("/api/admin/overview")
        .to_request();
    let overview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(overview["period"], "7d");
    assert_eq!(overview["newChatUsers"], 1);
    assert!(overview["dateFilter"]["createdAt"]["gte"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/admin/overview?period=decade")
        .to_request();
    let overview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(overview["dateFilter"], json!({}));
}
