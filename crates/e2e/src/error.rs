//! Error types for E2E testing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Playwright not found. Install with: npm install playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(String),

    #[error("Bootstrap failed: {operation} returned status {status}: {body}")]
    Bootstrap {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unknown template key: {0}")]
    UnknownTemplateKey(String),

    #[error("Expected-message fixture has no entry for key: {0}")]
    MissingMessage(String),

    #[error("API client error: {0}")]
    Api(#[from] contactlist_client::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
