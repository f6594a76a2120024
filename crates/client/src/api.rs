//! HTTP client for the Contact List API
//!
//! Every operation maps to one request and returns the raw response
//! (status plus JSON body) unmodified. There is no retry and no local
//! validation: a duplicate email or an invalid token comes back as a
//! non-2xx `ApiResponse`, and the caller asserts the outcome it expects.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{ContactDetails, UserDetails};

/// Raw response from the Contact List API.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Session token from the response body, if present
    pub fn token(&self) -> Option<&str> {
        self.body.get("token").and_then(Value::as_str)
    }

    /// `_id` of the record in the response body, if present
    pub fn id(&self) -> Option<&str> {
        self.body.get("_id").and_then(Value::as_str)
    }

    /// Deserialize the body into a typed record
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

/// Client for the Contact List HTTP API.
///
/// Both the base URL and the `reqwest::Client` are supplied by the caller;
/// nothing here reads ambient configuration.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Url, http: reqwest::Client) -> Self {
        Self { base_url, http }
    }

    /// Build a client for a base URL string with a default `reqwest::Client`
    pub fn for_base_url(base_url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(base_url)?, reqwest::Client::new()))
    }

    /// Base URL this client targets
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn into_api_response(resp: reqwest::Response) -> Result<ApiResponse> {
        let status = resp.status();
        let text = resp.text().await?;
        // Error bodies are sometimes plain text rather than JSON
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        debug!(%status, "api response");
        Ok(ApiResponse { status, body })
    }

    /// `POST /users` — create a user account.
    ///
    /// Success is 201 with `{ user, token }`. A duplicate email yields a
    /// non-2xx response for the caller to assert on.
    pub async fn create_user(&self, details: &UserDetails) -> Result<ApiResponse> {
        let resp = self
            .http
            .post(self.endpoint("users")?)
            .json(details)
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    /// `POST /users/login` — authenticate an existing user. Success is 200.
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse> {
        let resp = self
            .http
            .post(self.endpoint("users/login")?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    /// `POST /contacts` — create a contact owned by the token's user.
    ///
    /// `token` must be a valid, unexpired session token; an invalid token
    /// yields a non-2xx response, not a local fault.
    pub async fn create_contact(
        &self,
        details: &ContactDetails,
        token: &str,
    ) -> Result<ApiResponse> {
        let resp = self
            .http
            .post(self.endpoint("contacts")?)
            .bearer_auth(token)
            .json(details)
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    /// `GET /contacts/{id}` — fetch a single contact.
    pub async fn get_contact(&self, id: &str, token: &str) -> Result<ApiResponse> {
        let resp = self
            .http
            .get(self.endpoint(&format!("contacts/{id}"))?)
            .bearer_auth(token)
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    /// `PUT /contacts/{id}` — update a contact. Success is 200.
    pub async fn update_contact(
        &self,
        id: &str,
        details: &ContactDetails,
        token: &str,
    ) -> Result<ApiResponse> {
        let resp = self
            .http
            .put(self.endpoint(&format!("contacts/{id}"))?)
            .bearer_auth(token)
            .json(details)
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    /// `DELETE /contacts/{id}` — remove a contact. Success is 200 or 204.
    pub async fn delete_contact(&self, id: &str, token: &str) -> Result<ApiResponse> {
        let resp = self
            .http
            .delete(self.endpoint(&format!("contacts/{id}"))?)
            .bearer_auth(token)
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    /// Create a user and hand back the session token from the response.
    ///
    /// Fails with [`Error::MissingField`] if creation did not return a
    /// token; any non-2xx status surfaces through the returned response
    /// before the token is extracted, so callers get the server's reason.
    pub async fn create_user_token(&self, details: &UserDetails) -> Result<(ApiResponse, String)> {
        let resp = self.create_user(details).await?;
        let token = resp.token().map(str::to_owned);
        match token {
            Some(token) => Ok((resp, token)),
            None => Err(Error::MissingField("token")),
        }
    }
}
