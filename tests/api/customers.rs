use serde_json::json;
use workshop::models::{Customer, CustomerPayload};

use crate::helpers::TestApp;

#[actix_web::test]
async fn create_get_and_delete_a_customer(){
    let app = TestApp::spawn_app().await;
    let body = json!({
        "nome": "Ana",
        "telefone": "111",
        "email": "a@x.com",
        "endereco": "R1"
    });

    let response = app.post_json("/clientes", &body).await;
    assert_eq!(response.status().as_u16(), 201);

    let created = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(created, json!({
        "id_cliente": 1,
        "nome": "Ana",
        "telefone": "111",
        "email": "a@x.com",
        "endereco": "R1"
    }));

    let response = app.get_path("/clientes/1").await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json::<serde_json::Value>().await.unwrap(), created);

    let response = app.delete_path("/clientes/1").await;
    assert_eq!(response.status().as_u16(), 200);
    let message = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(message["message"], "Cliente removido com sucesso");

    assert_eq!(app.status_of::<Customer>(1).await, 404);
}

#[actix_web::test]
async fn get_unknown_customer_returns_404_with_message(){
    let app = TestApp::spawn_app().await;

    let response = app.get_path("/clientes/42").await;

    assert_eq!(response.status().as_u16(), 404);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "Cliente não encontrado");
}

#[actix_web::test]
async fn non_numeric_id_is_not_found(){
    let app = TestApp::spawn_app().await;

    let response = app.get_path("/clientes/abc").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn list_is_ordered_by_id(){
    let app = TestApp::spawn_app().await;
    for _ in 0..3 {
        app.seed_customer().await;
    }

    let ids: Vec<i32> = app.list::<Customer>().await
        .iter()
        .map(|c| c.id_cliente)
        .collect();

    assert_eq!(ids, vec![1, 2, 3]);
}

#[actix_web::test]
async fn update_overwrites_every_column(){
    let app = TestApp::spawn_app().await;
    let customer = app.seed_customer().await;

    let response = app.put_json(
        &format!("/clientes/{}", customer.id_cliente),
        &json!({ "nome": "Bia", "email": "b@x.com" })
    ).await;
    assert_eq!(response.status().as_u16(), 200);

    let updated = response.json::<Customer>().await.unwrap();
    assert_eq!(updated, Customer{
        id_cliente: customer.id_cliente,
        nome: "Bia".to_string(),
        telefone: None,
        email: Some("b@x.com".to_string()),
        endereco: None
    });

    let fetched = app.list::<Customer>().await;
    assert_eq!(fetched, vec![updated]);
}

#[actix_web::test]
async fn update_unknown_customer_returns_404(){
    let app = TestApp::spawn_app().await;

    let response = app.put_json("/clientes/7", &json!({ "nome": "Bia" })).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn update_unknown_customer_with_incomplete_body_returns_404(){
    let app = TestApp::spawn_app().await;

    let response = app.put_json("/clientes/999", &json!({ "email": "x@y.com" })).await;

    assert_eq!(response.status().as_u16(), 404);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["error"], "Cliente não encontrado");
}

#[actix_web::test]
async fn delete_unknown_customer_returns_404(){
    let app = TestApp::spawn_app().await;

    let response = app.delete_path("/clientes/7").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn missing_required_field_is_a_server_error(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/clientes", &json!({ "telefone": "111" })).await;

    assert_eq!(response.status().as_u16(), 500);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nome"));
    assert!(app.list::<Customer>().await.is_empty());
}

#[actix_web::test]
async fn update_without_required_field_is_a_server_error(){
    let app = TestApp::spawn_app().await;
    let customer = app.seed_customer().await;

    let response = app.put_json(
        &format!("/clientes/{}", customer.id_cliente),
        &json!({ "email": "x@y.com" })
    ).await;

    assert_eq!(response.status().as_u16(), 500);
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nome"));
    assert_eq!(app.list::<Customer>().await, vec![customer]);
}

#[actix_web::test]
async fn created_customer_equals_input_plus_id(){
    let app = TestApp::spawn_app().await;
    let payload = CustomerPayload{
        nome: "Carlos".to_string(),
        telefone: None,
        email: Some("c@x.com".to_string()),
        endereco: Some("Rua 2".to_string())
    };

    let created = app.create::<Customer>(&payload).await;

    let response = app.get_path(&format!("/clientes/{}", created.id_cliente)).await;
    let fetched = response.json::<Customer>().await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(workshop::models::Collection::payload(&fetched), payload);
}
