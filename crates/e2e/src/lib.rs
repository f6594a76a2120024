//! Contact List E2E Test Framework
//!
//! Browser-side half of the test suite. Declarative YAML scenarios are
//! compiled into Playwright scripts and executed via `node`; authenticated
//! starting states come from the API bootstrap in `contactlist-client`
//! instead of driving the signup/login UI.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     TestRunner                               │
//! │   ├── bootstrap (session::login_via_api, contact seeding)    │
//! │   ├── template rendering ({{user.*}}, {{messages.*}}, ...)   │
//! │   ├── PlaywrightHandle::run_steps(prelude + steps)           │
//! │   └── suite results -> JSON                                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │   Scenario (YAML)                                            │
//! │     ├── name, description, tags, viewport                    │
//! │     ├── bootstrap: create_user | login_via_api               │
//! │     └── steps: navigate / click / fill / assert_* / ...      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod messages;
pub mod playwright;
pub mod runner;
pub mod scenario;
pub mod selectors;
pub mod session;
pub mod template;

pub use config::Config;
pub use error::{E2eError, E2eResult};
pub use runner::TestRunner;
pub use scenario::{Scenario, Step};
