#![allow(clippy::unwrap_used)]
// Integration tests for `InventoryClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use inventario_api::{
    Error, InventoryClient, MovementKind, MovementQuery, NewMovement, NewProduct, ProductQuery,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, InventoryClient) {
    let server = MockServer::start().await;
    let base = format!("{}/api", server.uri());
    let client = InventoryClient::with_client(&base, reqwest::Client::new()).unwrap();
    (server, client)
}

// ── Product tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_products() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 1,
                "codigo": "TIN-001",
                "nombre": "Tinta cian 1L",
                "categoria": "Tintas",
                "unidad": "L",
                "stock_actual": 4.0,
                "stock_minimo": 5.0,
                "precio_unitario": 12.5,
                "ubicacion": "A-1",
                "observaciones": null,
                "activo": true,
                "created_at": "2024-06-15T10:30:00",
                "updated_at": "2024-06-15T10:30:00"
            }
        ])))
        .mount(&server)
        .await;

    let products = client.list_products().await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].code, "TIN-001");
    assert_eq!(products[0].unit.as_deref(), Some("L"));
    assert_eq!(products[0].unit_price, Some(12.5));
    assert!(products[0].is_low_stock());
}

#[tokio::test]
async fn test_list_products_http_error_carries_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "boom" })))
        .mount(&server)
        .await;

    let err = client.list_products().await.unwrap_err();

    assert!(matches!(err, Error::Http { status: 500 }), "got: {err:?}");
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Error HTTP: 500");
}

#[tokio::test]
async fn test_list_products_filtered_sends_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .and(query_param("categoria", "Tintas"))
        .and(query_param("activo", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let query = ProductQuery {
        category: Some("Tintas".into()),
        active: Some(false),
    };
    let products = client.list_products_filtered(&query).await.unwrap();
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/productos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_products().await.unwrap_err();
    match err {
        Error::Deserialization { body, message } => {
            assert_eq!(body, "<html>oops</html>");
            assert!(!message.contains("oops"), "body leaked into message: {message}");
        }
        other => panic!("expected Deserialization, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_product_posts_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/productos"))
        .and(body_json(json!({
            "codigo": "TIN-002",
            "nombre": "Tinta magenta",
            "stock_minimo": 3.0
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2 })))
        .expect(1)
        .mount(&server)
        .await;

    let product = NewProduct {
        code: "TIN-002".into(),
        name: "Tinta magenta".into(),
        min_stock: Some(3.0),
        ..NewProduct::default()
    };
    client.create_product(&product).await.unwrap();
}

#[tokio::test]
async fn test_create_product_rejection_surfaces_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/productos"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "codigo duplicado" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create_product(&NewProduct {
            code: "X".into(),
            name: "Y".into(),
            ..NewProduct::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.api_message(), Some("codigo duplicado"));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_create_rejection_without_json_body_has_no_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/movimientos"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client
        .create_movement(&NewMovement {
            product_id: 1,
            kind: MovementKind::Entry,
            quantity: 1.0,
            reason: None,
            user: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Rejected {
            status: 502,
            message: None
        }
    ));
}

// ── Movement tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_movements() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/movimientos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 10,
                "producto_id": 1,
                "tipo": "salida",
                "cantidad": 2,
                "motivo": "Pedido 42",
                "usuario": "ana",
                "fecha": "2024-06-15T10:30:00.123456"
            }
        ])))
        .mount(&server)
        .await;

    let movements = client.list_movements().await.unwrap();

    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].kind, MovementKind::Exit);
    assert_eq!(movements[0].quantity, 2.0);
    assert_eq!(movements[0].user.as_deref(), Some("ana"));
}

#[tokio::test]
async fn test_unknown_movement_type_skips_only_that_row() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/movimientos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "producto_id": 1, "tipo": "entrada", "cantidad": 5 },
            { "id": 2, "producto_id": 1, "tipo": "ajuste", "cantidad": -1 },
            { "id": 3, "producto_id": 2, "tipo": "salida", "cantidad": 1 }
        ])))
        .mount(&server)
        .await;

    let movements = client.list_movements().await.unwrap();

    let ids: Vec<i64> = movements.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_movements_body_that_is_not_a_list_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/movimientos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "x" })))
        .mount(&server)
        .await;

    let err = client.list_movements().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_list_movements_filtered_sends_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/movimientos"))
        .and(query_param("producto_id", "3"))
        .and(query_param("tipo", "entrada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let query = MovementQuery {
        product_id: Some(3),
        kind: Some(MovementKind::Entry),
    };
    client.list_movements_filtered(&query).await.unwrap();
}

#[tokio::test]
async fn test_create_movement_posts_json() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/movimientos"))
        .and(body_json(json!({
            "producto_id": 4,
            "tipo": "entrada",
            "cantidad": 10.0,
            "motivo": "Compra"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 99 })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .create_movement(&NewMovement {
            product_id: 4,
            kind: MovementKind::Entry,
            quantity: 10.0,
            reason: Some("Compra".into()),
            user: None,
        })
        .await
        .unwrap();
}

// ── Statistics / health tests ───────────────────────────────────────

#[tokio::test]
async fn test_get_statistics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/estadisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_productos": 12,
            "productos_bajo_stock": 3,
            "valor_total_inventario": 1520.75
        })))
        .mount(&server)
        .await;

    let stats = client.get_statistics().await.unwrap();

    assert_eq!(stats.total_products, 12);
    assert_eq!(stats.low_stock_products, 3);
    assert_eq!(stats.total_value, 1520.75);
}

#[tokio::test]
async fn test_health_lives_at_server_root() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "timestamp": "2024-06-15T10:30:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let health = client.health().await.unwrap();
    assert!(health.is_ok());
}

#[tokio::test]
async fn test_transport_failure_is_reported_as_transport() {
    let client =
        InventoryClient::with_client("http://127.0.0.1:1/api", reqwest::Client::new()).unwrap();

    let err = client.list_products().await.unwrap_err();
    assert!(err.is_transport(), "got: {err:?}");
}
