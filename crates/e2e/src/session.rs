//! API-driven session bootstrap
//!
//! Any scenario that merely needs an authenticated user skips the
//! signup/login UI: the account is created over HTTP, and the session
//! token is applied to the browser as the `token` cookie. Token
//! acquisition lives in `contactlist-client`; this module turns a token
//! into browser prelude steps and composes the two.

use tracing::info;

use contactlist_client::{profile, ApiClient, ApiResponse, ContactDetails, UserDetails};

use crate::error::{E2eError, E2eResult};
use crate::scenario::{ContactSeed, Step};

/// Name of the session cookie the application reads
pub const TOKEN_COOKIE: &str = "token";

/// An authenticated starting state for one scenario
#[derive(Debug, Clone)]
pub struct Session {
    /// The user the session belongs to
    pub user: UserDetails,

    /// Session token for further authenticated API calls
    pub token: String,

    /// Browser steps applying the session before the scenario's own steps
    pub prelude: Vec<Step>,
}

fn bootstrap_failure(operation: &'static str, resp: &ApiResponse) -> E2eError {
    E2eError::Bootstrap {
        operation,
        status: resp.status.as_u16(),
        body: resp.body.to_string(),
    }
}

/// Create a fresh random user over the API and hand back its token.
///
/// A non-201 response is fatal: without the account the scenario cannot
/// run, so there is no point continuing (and no retry).
pub async fn create_user(api: &ApiClient) -> E2eResult<(UserDetails, String)> {
    let user = profile::random_user();
    let resp = api.create_user(&user).await?;
    if resp.status.as_u16() != 201 {
        return Err(bootstrap_failure("create_user", &resp));
    }
    let token = resp
        .token()
        .ok_or(contactlist_client::Error::MissingField("token"))?
        .to_owned();

    info!(email = %user.email, "bootstrap user created");
    Ok((user, token))
}

/// Browser steps applying a session token: seed the `token` cookie,
/// verify it was actually set, navigate to the target page.
pub fn apply_token(token: &str, target: &str) -> Vec<Step> {
    vec![
        Step::SetCookie {
            name: TOKEN_COOKIE.to_string(),
            value: token.to_string(),
        },
        Step::AssertCookie {
            name: TOKEN_COOKIE.to_string(),
            value: token.to_string(),
        },
        Step::Navigate {
            path: target.to_string(),
        },
    ]
}

/// Full login bootstrap: create a user over the API, then produce the
/// browser prelude that applies its token.
pub async fn login_via_api(api: &ApiClient, target: &str) -> E2eResult<Session> {
    let (user, token) = create_user(api).await?;
    let prelude = apply_token(&token, target);

    Ok(Session {
        user,
        token,
        prelude,
    })
}

/// Materialize a contact seed into a payload
pub fn seed_details(seed: &ContactSeed) -> ContactDetails {
    match seed {
        ContactSeed::Random => profile::random_contact(),
        ContactSeed::Minimal => profile::minimal_contact(),
        ContactSeed::Fixed(details) => details.clone(),
    }
}

/// Create a contact over the API with the session token. Fatal on non-201,
/// like user creation: seeded state is a precondition, not an assertion.
pub async fn seed_contact(
    api: &ApiClient,
    token: &str,
    details: &ContactDetails,
) -> E2eResult<()> {
    let resp = api.create_contact(details, token).await?;
    if resp.status.as_u16() != 201 {
        return Err(bootstrap_failure("create_contact", &resp));
    }
    Ok(())
}
