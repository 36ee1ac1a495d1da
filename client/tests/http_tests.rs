use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use shavukha_client::{load_catalog, submit_order, HttpShopApi, ShopApi};
use shavukha_common::cart::CartLineItem;
use shavukha_common::checkout::{CheckoutPhase, DeliveryType, PayType};
use shavukha_common::config::{PopupMessages, ShopConfig};
use shavukha_common::customizer::Customizer;
use shavukha_common::error::{CatalogError, ConfigError};
use shavukha_common::id::RemoteId;
use shavukha_common::order::OrderOutcome;
use shavukha_common::product::{Catalog, CategoryFilter, ProductCategory};
use shavukha_common::session::ShopSession;
use shavukha_common::testing::RecordingHost;

const CATALOG: &str = r#"{
    "mainMenu": [
        {
            "id": 1,
            "name": "Шаурма классическая",
            "price": 250,
            "ingredients": [{"id": 1, "name": "Сыр", "price": 50}],
            "removableIngredients": [{"id": 7, "name": "Лук", "price": 0, "isRemovable": true}]
        },
        {"id": 2, "name": "Шаурма сырная", "price": 290}
    ],
    "drinks": [{"id": 10, "name": "Айран", "price": 100}]
}"#;

/// What the stub order service answers with.
#[derive(Clone)]
enum OrderReply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

#[derive(Clone)]
struct Stub {
    reply: OrderReply,
    catalog: Option<&'static str>,
    received: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn products(State(stub): State<Stub>) -> impl IntoResponse {
    match stub.catalog {
        Some(body) => (StatusCode::OK, body.to_string()),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "db down".to_string()),
    }
}

async fn web_data(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.received.lock().unwrap().push((content_type, body));
    match stub.reply {
        OrderReply::Json(status, value) => (status, value.to_string()),
        OrderReply::Text(status, text) => (status, text.to_string()),
    }
}

async fn spawn_stub(reply: OrderReply, catalog: Option<&'static str>) -> (String, Stub) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let stub = Stub {
        reply,
        catalog,
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/products", get(products))
        .route("/api/web-data", post(web_data))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), stub)
}

fn api_for(base: &str) -> HttpShopApi {
    let config = ShopConfig {
        product_service_url: base.to_string(),
        order_service_url: base.to_string(),
        ..ShopConfig::default()
    };
    HttpShopApi::new(&config).unwrap()
}

fn line(catalog: &Catalog, index: usize, quantity: u32) -> CartLineItem {
    let product = catalog.section(&ProductCategory::MainMenu)[index].clone();
    let mut item = Customizer::new(product).commit();
    item.quantity = quantity;
    item
}

/// Cart of 250×2 + 100×1 with a pickup form filled in.
fn ready_session(catalog: &Catalog) -> ShopSession<RecordingHost> {
    let mut session = ShopSession::new(RecordingHost::default(), PopupMessages::default());
    session.add_to_cart(line(catalog, 0, 2));
    let drink = catalog.section(&ProductCategory::Drinks)[0].clone();
    session.add_to_cart(Customizer::new(drink).commit());

    session.proceed_to_checkout();
    let form = session.checkout_mut().unwrap();
    form.set_delivery_type(DeliveryType::Pickup);
    form.set_pay_type(PayType::Cash);
    form.set_phone("+79990000000");
    session
}

#[tokio::test]
async fn catalog_loads_from_product_service() {
    let (base, _stub) = spawn_stub(OrderReply::Json(StatusCode::OK, json!({})), Some(CATALOG)).await;
    let api = api_for(&base);

    let mut catalog = Catalog::default();
    load_catalog(&api, &mut catalog).await.unwrap();

    assert_eq!(catalog.product_count(), 3);
    let drinks: Vec<_> = catalog.sections(&CategoryFilter::parse("drinks")).collect();
    assert_eq!(drinks.len(), 1);
    assert_eq!(drinks[0].1[0].name, "Айран");
}

#[tokio::test]
async fn catalog_failure_keeps_previous_catalog() {
    let (base, _stub) = spawn_stub(OrderReply::Json(StatusCode::OK, json!({})), Some(CATALOG)).await;
    let mut catalog = Catalog::default();
    load_catalog(&api_for(&base), &mut catalog).await.unwrap();

    let (broken, _stub) = spawn_stub(OrderReply::Json(StatusCode::OK, json!({})), None).await;
    let err = load_catalog(&api_for(&broken), &mut catalog).await.unwrap_err();
    assert!(matches!(err, CatalogError::Status(500)));
    assert_eq!(catalog.product_count(), 3);
}

#[tokio::test]
async fn catalog_with_bad_json_is_a_decode_failure() {
    let (base, _stub) =
        spawn_stub(OrderReply::Json(StatusCode::OK, json!({})), Some("<html>")).await;
    let err = api_for(&base).fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn accepted_pickup_order_clears_cart_and_closes_form() {
    let (base, stub) = spawn_stub(
        OrderReply::Json(StatusCode::OK, json!({"success": true})),
        Some(CATALOG),
    )
    .await;
    let api = api_for(&base);
    let catalog = api.fetch_catalog().await.unwrap();
    let mut session = ready_session(&catalog);

    let outcome = submit_order(&mut session, &api, Some(RemoteId::Number(987654321)))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        OrderOutcome::Accepted {
            delivery_type: DeliveryType::Pickup
        }
    );
    assert!(session.cart().is_empty());
    assert!(session.checkout().is_none());
    assert_eq!(
        session.host().last_popup().unwrap().message,
        "Можете забирать заказ через 15 минут"
    );

    let received = stub.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body["totalPrice"], 600);
    assert_eq!(body["deliveryType"], "pickup");
    assert_eq!(body["payType"], "cash");
    assert_eq!(body["phone"], "+79990000000");
    assert!(body["address"].is_null());
    assert_eq!(body["userId"], 987654321);
    assert_eq!(body["products"][0]["quantity"], 2);
    assert_eq!(body["products"][0]["finalPrice"], 250);
}

#[tokio::test]
async fn server_error_keeps_cart_and_form_open() {
    let (base, _stub) = spawn_stub(
        OrderReply::Text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        Some(CATALOG),
    )
    .await;
    let api = api_for(&base);
    let catalog = api.fetch_catalog().await.unwrap();
    let mut session = ready_session(&catalog);

    let outcome = submit_order(&mut session, &api, None).await.unwrap();

    assert_eq!(outcome, OrderOutcome::Rejected { status: 500 });
    assert_eq!(session.cart().len(), 2);
    assert_eq!(session.checkout().unwrap().phase(), CheckoutPhase::Rejected);
    let popup = session.host().last_popup().unwrap();
    assert_eq!(popup.title, "Ошибка");
    assert!(popup.message.contains("500"));
}

#[tokio::test]
async fn success_without_json_body_is_reported() {
    let (base, _stub) =
        spawn_stub(OrderReply::Text(StatusCode::OK, "OK"), Some(CATALOG)).await;
    let api = api_for(&base);
    let catalog = api.fetch_catalog().await.unwrap();
    let mut session = ready_session(&catalog);

    let outcome = submit_order(&mut session, &api, None).await.unwrap();

    assert!(matches!(outcome, OrderOutcome::TransportFailed { .. }));
    assert_eq!(session.cart().len(), 2);
    assert!(session
        .host()
        .last_popup()
        .unwrap()
        .message
        .starts_with("Произошла ошибка: "));
}

#[tokio::test]
async fn unreachable_order_service_is_a_transport_failure() {
    let (base, _stub) = spawn_stub(OrderReply::Json(StatusCode::OK, json!({})), Some(CATALOG)).await;
    let catalog = api_for(&base).fetch_catalog().await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let mut session = ready_session(&catalog);
    let outcome = submit_order(&mut session, &api_for(&dead), None).await.unwrap();

    assert!(matches!(outcome, OrderOutcome::TransportFailed { .. }));
    assert_eq!(session.cart().len(), 2);
    assert!(session.checkout().unwrap().can_submit());
}

#[tokio::test]
async fn incomplete_form_never_reaches_the_service() {
    let (base, stub) = spawn_stub(OrderReply::Json(StatusCode::OK, json!({})), Some(CATALOG)).await;
    let api = api_for(&base);
    let catalog = api.fetch_catalog().await.unwrap();
    let mut session = ready_session(&catalog);
    session
        .checkout_mut()
        .unwrap()
        .set_delivery_type(DeliveryType::Delivery);

    assert!(submit_order(&mut session, &api, None).await.is_err());
    assert!(stub.received.lock().unwrap().is_empty());
    assert_eq!(session.cart().len(), 2);
}

#[test]
fn malformed_base_url_is_rejected_up_front() {
    let config = ShopConfig {
        order_service_url: "http://exa mple.ru".to_string(),
        ..ShopConfig::default()
    };
    assert!(matches!(
        HttpShopApi::new(&config),
        Err(ConfigError::InvalidUrl {
            name: "order_service_url",
            ..
        })
    ));

    let api = api_for("http://127.0.0.1:8080");
    assert_eq!(api.catalog_url().as_str(), "http://127.0.0.1:8080/api/products");
    assert_eq!(api.order_url().as_str(), "http://127.0.0.1:8080/api/web-data");
}
