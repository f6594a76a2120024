//! Contact List API Client
//!
//! Pure-HTTP layer of the E2E suite: wire types for the Contact List
//! application, a thin client that returns raw responses for callers to
//! assert on, and synthetic profile generation for fixture data.
//!
//! The base URL and `reqwest::Client` are injected by the caller rather
//! than read from ambient configuration, so this crate is testable in
//! isolation from the browser layer.

pub mod api;
pub mod error;
pub mod profile;
pub mod types;

pub use api::{ApiClient, ApiResponse};
pub use error::{Error, Result};
pub use types::{ContactDetails, ContactRecord, CreateUserBody, UserDetails, UserRecord};

/// Client version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
