//! Declarative YAML test scenarios

use std::path::Path;

use serde::{Deserialize, Serialize};

use contactlist_client::ContactDetails;

use crate::error::{E2eError, E2eResult};

/// A complete browser scenario parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size for the browser
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Authenticated starting state established over HTTP before the
    /// browser steps run
    #[serde(default)]
    pub bootstrap: Option<Bootstrap>,

    /// Steps to execute in order
    pub steps: Vec<Step>,
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 1280,
        height: 720,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// HTTP-side setup performed before any browser step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Bootstrap {
    /// Create a random user account only. The scenario drives login or
    /// sign-up through the UI itself, with the credentials available as
    /// `{{user.*}}` template values.
    CreateUser,

    /// Full session bootstrap: create a random user, seed the `token`
    /// cookie, verify it, navigate to `target`. Listed contacts are
    /// created over the API with the session token before navigation
    /// state is used; the first one is exposed as `{{contact.*}}`.
    LoginViaApi {
        #[serde(default = "default_target")]
        target: String,
        #[serde(default)]
        contacts: Vec<ContactSeed>,
    },
}

fn default_target() -> String {
    "/contactList".to_string()
}

/// A contact to pre-create during bootstrap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSeed {
    /// Every field randomized
    Random,
    /// Names, email, and birthdate only
    Minimal,
    /// Explicit payload
    Fixed(ContactDetails),
}

/// A single step in a scenario.
///
/// Element-addressing steps take a DOM `id` and compile to the
/// attribute-equality selector from [`crate::selectors::by_id`]. The
/// `*_selector` variants are the raw-CSS escape hatch for the contact
/// table rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to a path relative to the base URL
    Navigate { path: String },

    /// Click the element with this id
    Click {
        id: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Replace the value of the input with this id
    Fill { id: String, value: String },

    /// Wait for the element with this id to be visible
    Wait {
        id: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
    },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep { ms: u64 },

    /// Assert the element with this id is visible
    AssertVisible { id: String },

    /// Assert the element with this id no longer exists in the DOM
    AssertMissing {
        id: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
    },

    /// Assert on the text (or input value) of the element with this id
    AssertText {
        id: String,
        text: String,
        #[serde(default)]
        exact: bool,
    },

    /// Assert the current URL contains a fragment
    AssertUrlContains { fragment: String },

    /// Reload the current page
    Reload,

    /// Click an element by raw CSS selector
    ClickSelector { selector: String },

    /// Assert on the text of an element by raw CSS selector
    AssertSelectorText {
        selector: String,
        text: String,
        #[serde(default)]
        exact: bool,
    },

    /// Add a cookie to the browser context
    SetCookie { name: String, value: String },

    /// Assert a cookie is present with exactly this value
    AssertCookie { name: String, value: String },

    /// Take a full-page screenshot (debugging aid)
    Screenshot { name: String },

    /// Log a message from inside the script
    Log { message: String },
}

fn default_wait_timeout() -> u64 {
    5000
}

impl Step {
    /// Short name for logging
    pub fn name(&self) -> String {
        match self {
            Step::Navigate { path } => format!("navigate:{path}"),
            Step::Click { id, .. } => format!("click:{id}"),
            Step::Fill { id, .. } => format!("fill:{id}"),
            Step::Wait { id, .. } => format!("wait:{id}"),
            Step::Sleep { ms } => format!("sleep:{ms}ms"),
            Step::AssertVisible { id } => format!("assert_visible:{id}"),
            Step::AssertMissing { id, .. } => format!("assert_missing:{id}"),
            Step::AssertText { id, .. } => format!("assert_text:{id}"),
            Step::AssertUrlContains { fragment } => format!("assert_url_contains:{fragment}"),
            Step::Reload => "reload".to_string(),
            Step::ClickSelector { selector } => format!("click_selector:{selector}"),
            Step::AssertSelectorText { selector, .. } => {
                format!("assert_selector_text:{selector}")
            }
            Step::SetCookie { name, .. } => format!("set_cookie:{name}"),
            Step::AssertCookie { name, .. } => format!("assert_cookie:{name}"),
            Step::Screenshot { name } => format!("screenshot:{name}"),
            Step::Log { message } => {
                format!("log:{}", message.chars().take(30).collect::<String>())
            }
        }
    }
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        serde_yaml::from_str(yaml).map_err(E2eError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all scenarios from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut scenarios = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let scenario = Self::from_file(entry.path())?;
            scenarios.push(scenario);
        }

        Ok(scenarios)
    }

    /// Filter scenarios by tag
    pub fn filter_by_tag<'a>(scenarios: &'a [Self], tag: &str) -> Vec<&'a Self> {
        scenarios
            .iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect()
    }
}
