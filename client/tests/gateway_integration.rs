//! HttpBackend against a local stub of the booking REST API.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use claims::*;
use client::api::{ApiGateway, BarberShopBackend, GatewayConfig, HttpBackend, TokenSource};
use client::common::ApiError;
use client::model::{
    Barber, BookingRequest, CustomerUpdate, LoginRequest, PaymentMethod, Service, TimeSlot,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

struct FixedToken(&'static str);

impl TokenSource for FixedToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

async fn list_services() -> Json<Value> {
    Json(json!([
        {"id": 2, "nome": "Barba", "duracao": 20, "preco": 25},
        {"id": "1", "nome": "Corte", "duracao": 30, "preco": 30.0}
    ]))
}

async fn list_barbers() -> Json<Value> {
    Json(json!([{"id": 10, "nome": "João", "fotoUrl": "http://img/joao.png"}]))
}

async fn availability(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match (
        params.get("barbeiroId").map(String::as_str),
        params.get("data").map(String::as_str),
    ) {
        (Some("10"), Some("2025-06-01")) => Json(json!({"horarios": ["09:00", "09:30"]})),
        _ => Json(json!({})),
    }
}

async fn create_booking(Json(body): Json<Value>) -> impl IntoResponse {
    if body["dataHorarioIso"] == "2025-06-01T09:00:00" {
        (StatusCode::CONFLICT, "Horário indisponível").into_response()
    } else {
        (StatusCode::CREATED, Json(json!({"id": 99, "status": "CONFIRMADO"}))).into_response()
    }
}

async fn customer(Path(id): Path<String>, headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer secret");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "").into_response();
    }
    Json(json!({"id": id, "nome": "Paulo"})).into_response()
}

async fn update_customer(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"id": id, "nome": body["nome"]}))
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["senha"] == "certa" {
        Json(json!({
            "token": "secret",
            "user": {"id": 7, "nome": "Paulo", "email": body["email"], "telefone": "", "role": "CLIENTE"}
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Credenciais inválidas").into_response()
    }
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!([]))
}

async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/servicos", get(list_services))
        .route("/barbeiros", get(list_barbers))
        .route("/disponibilidade", get(availability))
        .route("/agendamentos", post(create_booking))
        .route("/clientes/{id}", get(customer).put(update_customer))
        .route("/auth/login", post(login))
        .route("/lento", get(slow));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/")
}

async fn backend(tokens: Option<Arc<dyn TokenSource>>) -> HttpBackend {
    let base = spawn_stub().await;
    let mut gateway =
        ApiGateway::new(GatewayConfig::new(base, Duration::from_secs(5))).expect("gateway");
    if let Some(tokens) = tokens {
        gateway = gateway.with_token_source(tokens);
    }
    HttpBackend::new(gateway)
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

fn corte() -> Service {
    Service {
        id: "1".to_string(),
        nome: "Corte".to_string(),
        duracao: 30,
        preco: 30.0,
    }
}

fn joao() -> Barber {
    Barber {
        id: "10".to_string(),
        nome: "João".to_string(),
        telefone: None,
        foto_url: None,
    }
}

#[tokio::test]
async fn test_lists_normalise_ids() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();

    let services = assert_ok!(backend.list_services(&cancel).await);
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].id, "2");
    assert_eq!(services[1].id, "1");

    let barbers = assert_ok!(backend.list_barbers(&cancel).await);
    assert_eq!(barbers[0].id, "10");
    assert_some_eq!(barbers[0].foto_url.as_deref(), "http://img/joao.png");
}

#[tokio::test]
async fn test_availability_query_and_missing_field() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();

    let slots = assert_ok!(backend.availability("10", date(), &cancel).await);
    assert_eq!(slots, vec![TimeSlot::from("09:00"), TimeSlot::from("09:30")]);

    let other_day = date().succ_opt().expect("next day");
    let empty = assert_ok!(backend.availability("10", other_day, &cancel).await);
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_booking_conflict_is_classified() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();
    let request = BookingRequest::new(
        None,
        &corte(),
        &joao(),
        date(),
        &TimeSlot::from("09:00"),
        PaymentMethod::Loja,
    );

    let error = assert_err!(backend.create_booking(&request, &cancel).await);
    assert!(error.is_conflict());
    assert_some_eq!(error.backend_message(), "Horário indisponível");
}

#[tokio::test]
async fn test_booking_success_keeps_raw_confirmation() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();
    let request = BookingRequest::new(
        Some("7".to_string()),
        &corte(),
        &joao(),
        date(),
        &TimeSlot::from("09:30"),
        PaymentMethod::Cartao,
    );

    let confirmation = assert_ok!(backend.create_booking(&request, &cancel).await);
    assert_eq!(confirmation.0["status"], "CONFIRMADO");
}

#[tokio::test]
async fn test_bearer_token_is_attached() {
    let anonymous = backend(None).await;
    let cancel = CancellationToken::new();
    let error = assert_err!(anonymous.get_customer("7", &cancel).await);
    assert_some_eq!(error.status(), 401);

    let authorized = backend(Some(Arc::new(FixedToken("secret")))).await;
    let customer = assert_ok!(authorized.get_customer("7", &cancel).await);
    assert_eq!(customer.nome, "Paulo");
}

#[tokio::test]
async fn test_put_customer_update() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();
    let update = CustomerUpdate {
        nome: "Paulo Souza".to_string(),
        email: "p@x.com".to_string(),
        telefone: "11999999999".to_string(),
    };

    let updated = assert_ok!(backend.update_customer("7", &update, &cancel).await);
    assert_eq!(updated.id, "7");
    assert_eq!(updated.nome, "Paulo Souza");
}

#[tokio::test]
async fn test_login_rejection_carries_body() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();

    let response = assert_ok!(
        backend
            .login(&LoginRequest::new("p@x.com", "certa"), &cancel)
            .await
    );
    assert_eq!(response.token, "secret");
    assert_eq!(response.user.id, "7");

    let error = assert_err!(
        backend
            .login(&LoginRequest::new("p@x.com", "errada"), &cancel)
            .await
    );
    assert_some_eq!(error.backend_message(), "Credenciais inválidas");
}

#[tokio::test]
async fn test_cancel_during_request() {
    let backend = backend(None).await;
    let cancel = CancellationToken::new();

    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let result: Result<Vec<Service>, ApiError> = backend.gateway().get("/lento", &cancel).await;
    assert_err_eq!(result, ApiError::Cancelled);
}
