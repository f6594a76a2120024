//! API client contract tests against an in-process stub of the Contact
//! List application.
//!
//! The stub implements just enough of the hosted API (user creation with
//! duplicate detection, bearer-token auth, contact CRUD with email
//! normalization) to verify the client's bootstrap contract offline.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use contactlist_client::{ApiClient, ContactDetails, CreateUserBody, UserDetails};

#[derive(Default)]
struct StubState {
    /// email -> (user record, password, token)
    users: HashMap<String, (Value, String, String)>,
    /// contact id -> contact record
    contacts: HashMap<String, Value>,
    counter: AtomicU64,
}

type Shared = Arc<Mutex<StubState>>;

impl StubState {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{prefix}{n:020}")
    }

    fn token_valid(&self, token: &str) -> bool {
        self.users.values().any(|(_, _, t)| t == token)
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

async fn create_user(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();

    let email = body["email"].as_str().unwrap_or_default().to_lowercase();
    for field in ["firstName", "lastName", "email", "password"] {
        if body[field].as_str().unwrap_or_default().is_empty() {
            let msg = format!("User validation failed: {field}: Path `{field}` is required.");
            return (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response();
        }
    }
    if state.users.contains_key(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Email address is already in use" })),
        )
            .into_response();
    }

    let id = state.next_id("u");
    let token = state.next_id("tok");
    let user = json!({
        "_id": id,
        "firstName": body["firstName"],
        "lastName": body["lastName"],
        "email": email.clone(),
    });
    let password = body["password"].as_str().unwrap_or_default().to_owned();
    state
        .users
        .insert(email, (user.clone(), password, token.clone()));

    (
        StatusCode::CREATED,
        Json(json!({ "user": user, "token": token })),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let state = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_lowercase();
    let password = body["password"].as_str().unwrap_or_default();

    match state.users.get(&email) {
        Some((user, stored, token)) if stored == password => (
            StatusCode::OK,
            Json(json!({ "user": user, "token": token })),
        )
            .into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn create_contact(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match bearer(&headers) {
        Some(token) if state.token_valid(&token) => {}
        _ => {
            return (StatusCode::UNAUTHORIZED, "Please authenticate.").into_response();
        }
    }

    let mut record = body;
    let lowered = record["email"].as_str().map(str::to_lowercase);
    if let Some(email) = lowered {
        record["email"] = Value::String(email);
    }
    let id = state.next_id("c");
    record["_id"] = Value::String(id.clone());
    state.contacts.insert(id, record.clone());

    (StatusCode::CREATED, Json(record)).into_response()
}

async fn contact_by_id(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    method: axum::http::Method,
    body: Option<Json<Value>>,
) -> Response {
    let mut state = state.lock().unwrap();
    match bearer(&headers) {
        Some(token) if state.token_valid(&token) => {}
        _ => return (StatusCode::UNAUTHORIZED, "Please authenticate.").into_response(),
    }

    match method.as_str() {
        "GET" => match state.contacts.get(&id) {
            Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        "PUT" => {
            if !state.contacts.contains_key(&id) {
                return StatusCode::NOT_FOUND.into_response();
            }
            let Json(mut record) = body.unwrap_or(Json(json!({})));
            let lowered = record["email"].as_str().map(str::to_lowercase);
            if let Some(email) = lowered {
                record["email"] = Value::String(email);
            }
            record["_id"] = Value::String(id.clone());
            state.contacts.insert(id, record.clone());
            (StatusCode::OK, Json(record)).into_response()
        }
        "DELETE" => match state.contacts.remove(&id) {
            Some(_) => (StatusCode::OK, "Contact deleted").into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

async fn spawn_stub() -> (ApiClient, Shared) {
    let state: Shared = Arc::default();

    let app = Router::new()
        .route("/users", post(create_user))
        .route("/users/login", post(login))
        .route("/contacts", post(create_contact))
        .route(
            "/contacts/:id",
            delete(contact_by_id).get(contact_by_id).put(contact_by_id),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    let client = ApiClient::for_base_url(&format!("http://{addr}/")).expect("client for stub");
    (client, state)
}

fn ann_lee() -> UserDetails {
    UserDetails {
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        email: "ann.lee@example.com".into(),
        password: "Secret123".into(),
    }
}

#[tokio::test]
async fn create_user_returns_id_and_token() {
    let (client, _state) = spawn_stub().await;

    let resp = client
        .create_user(&contactlist_client::profile::random_user())
        .await
        .unwrap();

    assert_eq!(resp.status.as_u16(), 201);
    let body: CreateUserBody = resp.json().unwrap();
    assert!(!body.user.id.is_empty());
    assert!(!body.token.is_empty());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (client, _state) = spawn_stub().await;
    let user = ann_lee();

    let first = client.create_user(&user).await.unwrap();
    assert_eq!(first.status.as_u16(), 201);
    let body: CreateUserBody = first.json().unwrap();
    assert_eq!(body.user.email, "ann.lee@example.com");

    let second = client.create_user(&user).await.unwrap();
    assert!(second.status.is_client_error());
    assert!(
        second.body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("already in use"),
        "expected an email-in-use indication, got {}",
        second.body
    );
}

#[tokio::test]
async fn email_casing_is_normalized_by_the_server() {
    let (client, _state) = spawn_stub().await;
    let mut user = contactlist_client::profile::random_user();
    user.email = user.email.to_uppercase();

    let resp = client.create_user(&user).await.unwrap();
    assert_eq!(resp.status.as_u16(), 201);
    let body: CreateUserBody = resp.json().unwrap();
    assert_eq!(body.user.email, user.email.to_lowercase());
}

#[tokio::test]
async fn invalid_token_is_rejected_and_nothing_persists() {
    let (client, state) = spawn_stub().await;
    // A user exists, but the token we present is not theirs
    let (_, _token) = client
        .create_user_token(&contactlist_client::profile::random_user())
        .await
        .unwrap();

    let resp = client
        .create_contact(&contactlist_client::profile::random_contact(), "bogus")
        .await
        .unwrap();

    assert_eq!(resp.status.as_u16(), 401);
    assert!(state.lock().unwrap().contacts.is_empty());
}

#[tokio::test]
async fn full_contact_payload_is_echoed_with_lowercased_email() {
    let (client, _state) = spawn_stub().await;
    let (_, token) = client
        .create_user_token(&contactlist_client::profile::random_user())
        .await
        .unwrap();

    let mut contact = contactlist_client::profile::random_contact();
    contact.email = Some("MIXED.Case@Example.COM".into());

    let resp = client.create_contact(&contact, &token).await.unwrap();
    assert_eq!(resp.status.as_u16(), 201);
    assert!(resp.id().is_some_and(|id| !id.is_empty()));

    let record: contactlist_client::ContactRecord = resp.json().unwrap();
    assert_eq!(record.first_name, contact.first_name);
    assert_eq!(record.last_name, contact.last_name);
    assert_eq!(record.email.as_deref(), Some("mixed.case@example.com"));
    assert_eq!(record.birthdate, contact.birthdate);
    assert_eq!(record.phone, contact.phone);
    assert_eq!(record.street1, contact.street1);
    assert_eq!(record.street2, contact.street2);
    assert_eq!(record.city, contact.city);
    assert_eq!(record.state_province, contact.state_province);
    assert_eq!(record.postal_code, contact.postal_code);
    assert_eq!(record.country, contact.country);
}

#[tokio::test]
async fn login_succeeds_with_correct_credentials_only() {
    let (client, _state) = spawn_stub().await;
    let user = contactlist_client::profile::random_user();
    client.create_user(&user).await.unwrap();

    let ok = client.login(&user.email, &user.password).await.unwrap();
    assert_eq!(ok.status.as_u16(), 200);
    assert!(ok.token().is_some());

    let wrong_password = format!("{}d", user.password);
    let bad = client.login(&user.email, &wrong_password).await.unwrap();
    assert_eq!(bad.status.as_u16(), 401);
}

#[tokio::test]
async fn update_and_delete_round_trip() {
    let (client, _state) = spawn_stub().await;
    let (_, token) = client
        .create_user_token(&contactlist_client::profile::random_user())
        .await
        .unwrap();

    let created = client
        .create_contact(&contactlist_client::profile::minimal_contact(), &token)
        .await
        .unwrap();
    assert_eq!(created.status.as_u16(), 201);
    let id = created.id().unwrap().to_owned();

    let edited = ContactDetails {
        first_name: "Edited".into(),
        last_name: "Name".into(),
        street2: Some("Suite 9".into()),
        state_province: Some("WA".into()),
        ..Default::default()
    };
    let updated = client.update_contact(&id, &edited, &token).await.unwrap();
    assert_eq!(updated.status.as_u16(), 200);
    assert_eq!(updated.body["firstName"], "Edited");
    assert_eq!(updated.body["street2"], "Suite 9");

    let deleted = client.delete_contact(&id, &token).await.unwrap();
    assert!(deleted.is_success());

    let gone = client.get_contact(&id, &token).await.unwrap();
    assert_eq!(gone.status.as_u16(), 404);
}
