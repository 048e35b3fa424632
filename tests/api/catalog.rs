use diesel::RunQueryDsl;
use serde_json::json;
use workshop::models::{Collection, Employee, EmployeePayload, Part, PartPayload, Service, ServicePayload};

use crate::helpers::TestApp;

#[actix_web::test]
async fn employee_round_trips_with_hire_date(){
    let app = TestApp::spawn_app().await;
    let payload = EmployeePayload{
        nome: "João".to_string(),
        cargo: Some("Eletricista".to_string()),
        telefone: Some("222".to_string()),
        data_admissao: Some("2021-11-30".to_string())
    };

    let created = app.create::<Employee>(&payload).await;
    assert_eq!(created.payload(), payload);

    let response = app.get_path(&format!("/funcionarios/{}", created.id_funcionario)).await;
    let body = response.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["data_admissao"], "2021-11-30");
}

#[actix_web::test]
async fn hire_date_is_kept_as_sent(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/funcionarios", &json!({
        "nome": "João",
        "data_admissao": ""
    })).await;
    assert_eq!(response.status().as_u16(), 201);

    let employee = response.json::<Employee>().await.unwrap();
    assert_eq!(employee.data_admissao, Some(String::new()));
}

#[actix_web::test]
async fn employees_with_free_form_dates_are_still_listed(){
    let app = TestApp::spawn_app().await;
    let mut conn = app.pool.get().unwrap();
    diesel::sql_query(
        "INSERT INTO funcionarios (nome, data_admissao) VALUES ('Rita', ''), ('Davi', '30/11/2021')"
    )
    .execute(&mut conn)
    .unwrap();

    let response = app.get_path("/funcionarios").await;
    assert_eq!(response.status().as_u16(), 200);

    let dates: Vec<Option<String>> = app.list::<Employee>().await
        .into_iter()
        .map(|e| e.data_admissao)
        .collect();
    assert_eq!(dates, vec![Some(String::new()), Some("30/11/2021".to_string())]);
}

#[actix_web::test]
async fn part_update_replaces_stock_and_price(){
    let app = TestApp::spawn_app().await;
    let part = app.seed_part().await;

    let replacement = PartPayload{
        nome: "Filtro de ar".to_string(),
        descricao: Some("Original".to_string()),
        preco_unitario: 12.5,
        quantidade_estoque: 2
    };
    let response = app.put_json(
        &format!("/pecas/{}", part.id_peca),
        &serde_json::to_value(&replacement).unwrap()
    ).await;
    assert_eq!(response.status().as_u16(), 200);

    let fetched = app.get_path(&format!("/pecas/{}", part.id_peca)).await
        .json::<Part>().await.unwrap();
    assert_eq!(fetched.id_peca, part.id_peca);
    assert_eq!(fetched.payload(), replacement);
}

#[actix_web::test]
async fn part_without_stock_quantity_is_rejected(){
    let app = TestApp::spawn_app().await;

    let response = app.post_json("/pecas", &json!({ "nome": "Filtro", "preco_unitario": 10 })).await;

    assert_eq!(response.status().as_u16(), 500);
    assert!(app.list::<Part>().await.is_empty());
}

#[actix_web::test]
async fn service_lifecycle(){
    let app = TestApp::spawn_app().await;
    let service = app.seed_service().await;
    assert_eq!(service.payload(), ServicePayload{ descricao: "Alinhamento".to_string(), preco: 80.0 });

    let response = app.delete_path(&format!("/servicos/{}", service.id_servico)).await;
    assert_eq!(response.status().as_u16(), 200);

    assert!(app.list::<Service>().await.is_empty());
    let response = app.delete_path(&format!("/servicos/{}", service.id_servico)).await;
    assert_eq!(response.status().as_u16(), 404);
}
