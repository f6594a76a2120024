//! Runner configuration
//!
//! Everything is overridable through `CONTACTLIST_*` environment
//! variables; defaults point at the hosted application and the fixture
//! data shipped with this crate.

use std::path::PathBuf;

use crate::playwright::Browser;

/// The hosted Contact List application
pub const DEFAULT_BASE_URL: &str = "https://thinking-tester-contact-list.herokuapp.com";

/// Runner configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the application under test
    pub base_url: String,

    /// Directory holding scenario YAML files
    pub scenarios_dir: PathBuf,

    /// JSON fixture with the environment's expected error messages
    pub messages_file: PathBuf,

    /// Directory for debug screenshots
    pub screenshot_dir: PathBuf,

    /// Directory for suite results
    pub output_dir: PathBuf,

    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            scenarios_dir: PathBuf::from("scenarios"),
            messages_file: PathBuf::from("fixtures/error_messages.json"),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            output_dir: PathBuf::from("test-results"),
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Defaults overridden by `CONTACTLIST_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_var("CONTACTLIST_BASE_URL") {
            config.base_url = v;
        }
        if let Some(v) = env_var("CONTACTLIST_SCENARIOS_DIR") {
            config.scenarios_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var("CONTACTLIST_MESSAGES_FILE") {
            config.messages_file = PathBuf::from(v);
        }
        if let Some(v) = env_var("CONTACTLIST_SCREENSHOT_DIR") {
            config.screenshot_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var("CONTACTLIST_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }
        if let Some(v) = env_var("CONTACTLIST_BROWSER") {
            if let Ok(browser) = v.parse() {
                config.browser = browser;
            }
        }
        if let Some(v) = env_var("CONTACTLIST_HEADLESS") {
            config.headless = v != "0" && v != "false";
        }

        config
    }
}
