mod common;

use common::MemoryGateway;
use inventory_api::{AppError, EntityDef, Repository, ORDERS, PRODUCTS, SUPPLIERS};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn body(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        other => panic!("not an object: {other}"),
    }
}

fn repo(entity: &'static EntityDef) -> (Arc<MemoryGateway>, Repository) {
    let gateway = Arc::new(MemoryGateway::new());
    (gateway.clone(), Repository::new(gateway, entity))
}

fn valid_body(entity: &EntityDef) -> Value {
    match entity.table_name {
        "products" => json!({ "name": "Hex bolt", "price": 0.25, "stock": 400 }),
        "suppliers" => json!({ "name": "Acme", "contact_email": "sales@acme.test" }),
        "orders" => json!({ "supplier_id": 1, "order_date": "2024-01-01", "total_amount": 100, "status": "open" }),
        other => panic!("unknown table {other}"),
    }
}

#[tokio::test]
async fn created_record_reads_back_with_same_fields() {
    for entity in [&PRODUCTS, &SUPPLIERS, &ORDERS] {
        let (_, repo) = repo(entity);
        let created = repo.create(&body(valid_body(entity))).await.unwrap();
        let id = created["id"].as_i64().unwrap();
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched, created, "{}", entity.name);
    }
}

#[tokio::test]
async fn supplier_create_returns_nulls_for_omitted_fields() {
    let (_, repo) = repo(&SUPPLIERS);
    let created = repo.create(&body(json!({ "name": "Acme" }))).await.unwrap();
    assert_eq!(
        created,
        json!({
            "id": 1,
            "name": "Acme",
            "contact_name": null,
            "contact_email": null,
            "contact_phone": null,
            "address": null
        })
    );
}

#[tokio::test]
async fn invalid_create_touches_no_storage() {
    for (entity, bad) in [
        (&SUPPLIERS, json!({ "contact_name": "Jo" })),
        (&ORDERS, json!({ "order_date": "2024-01-01", "total_amount": 100 })),
    ] {
        let (gateway, repo) = repo(entity);
        let err = repo.create(&body(bad)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Missing required fields"));
        assert_eq!(gateway.calls(), 0);
        assert!(repo.list().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn delete_removes_from_get_and_list() {
    let (_, repo) = repo(&ORDERS);
    let a = repo.create(&body(valid_body(&ORDERS))).await.unwrap();
    let b = repo.create(&body(valid_body(&ORDERS))).await.unwrap();
    let id = a["id"].as_i64().unwrap();

    repo.delete(id).await.unwrap();

    assert_eq!(repo.get_by_id(id).await.unwrap(), None);
    let ids: Vec<Value> = repo.list().await.unwrap().into_iter().map(|r| r["id"].clone()).collect();
    assert_eq!(ids, vec![b["id"].clone()]);
}

#[tokio::test]
async fn delete_twice_is_not_an_error() {
    let (_, repo) = repo(&PRODUCTS);
    let created = repo.create(&body(valid_body(&PRODUCTS))).await.unwrap();
    let id = created["id"].as_i64().unwrap();
    repo.delete(id).await.unwrap();
    repo.delete(id).await.unwrap();
}

#[tokio::test]
async fn update_missing_id_echoes_submitted_fields() {
    let (_, repo) = repo(&SUPPLIERS);
    let updated = repo.update(999, &body(json!({ "name": "Ghost" }))).await.unwrap();
    assert_eq!(updated["id"], 999);
    assert_eq!(updated["name"], "Ghost");
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn update_replaces_all_declared_fields() {
    let (_, repo) = repo(&SUPPLIERS);
    let created = repo
        .create(&body(json!({ "name": "Acme", "address": "1 Main St" })))
        .await
        .unwrap();
    let id = created["id"].as_i64().unwrap();

    repo.update(id, &body(json!({ "name": "Acme Ltd" }))).await.unwrap();

    let fetched = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(fetched["name"], "Acme Ltd");
    assert_eq!(fetched["address"], Value::Null);
}

#[tokio::test]
async fn update_validates_like_create() {
    let (gateway, repo) = repo(&ORDERS);
    let err = repo
        .update(1, &body(json!({ "supplier_id": 1, "order_date": "", "total_amount": 5 })))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn product_update_ignores_body_id() {
    let (_, repo) = repo(&PRODUCTS);
    let created = repo.create(&body(json!({ "name": "Nut" }))).await.unwrap();
    let id = created["id"].as_i64().unwrap();
    let updated = repo.update(id, &body(json!({ "id": 50, "name": "Lock nut" }))).await.unwrap();
    assert_eq!(updated, json!({ "id": id, "name": "Lock nut" }));
}

#[tokio::test]
async fn gateway_failure_is_storage_error() {
    let (gateway, repo) = repo(&PRODUCTS);
    gateway.fail();
    assert!(matches!(repo.list().await, Err(AppError::Storage(_))));
    assert!(matches!(repo.get_by_id(1).await, Err(AppError::Storage(_))));
    assert!(matches!(repo.delete(1).await, Err(AppError::Storage(_))));
}
