//! Main test runner orchestrating bootstrap, templates, and the browser

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use contactlist_client::ApiClient;

use crate::config::Config;
use crate::error::{E2eError, E2eResult};
use crate::messages::Messages;
use crate::playwright::{PlaywrightConfig, PlaywrightHandle};
use crate::scenario::{Bootstrap, Scenario, Step};
use crate::session;
use crate::template::TemplateContext;

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Result of running the whole suite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

/// Main E2E test runner
pub struct TestRunner {
    config: Config,
    messages: Messages,
    api: ApiClient,
}

impl TestRunner {
    /// Build a runner from configuration; loads the expected-message
    /// fixture and constructs the API client for the configured base URL.
    pub fn new(config: Config) -> E2eResult<Self> {
        let messages = Messages::from_file(&config.messages_file)?;
        let api = ApiClient::for_base_url(&config.base_url)?;
        Ok(Self {
            config,
            messages,
            api,
        })
    }

    /// API client targeting the configured base URL
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Run all scenarios in the scenarios directory
    pub async fn run_all(&self) -> E2eResult<SuiteResult> {
        let scenarios = Scenario::load_all(&self.config.scenarios_dir)?;
        self.run_scenarios(&scenarios).await
    }

    /// Run scenarios matching a tag
    pub async fn run_tagged(&self, tag: &str) -> E2eResult<SuiteResult> {
        let scenarios = Scenario::load_all(&self.config.scenarios_dir)?;
        let filtered: Vec<Scenario> = scenarios
            .into_iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect();
        self.run_scenarios(&filtered).await
    }

    /// Run a specific scenario by name
    pub async fn run_named(&self, name: &str) -> E2eResult<ScenarioResult> {
        let scenarios = Scenario::load_all(&self.config.scenarios_dir)?;
        let scenario = scenarios
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::ScenarioParse(format!("Scenario not found: {name}")))?;
        self.run_scenario(&scenario).await
    }

    /// Run a list of scenarios sequentially
    pub async fn run_scenarios(&self, scenarios: &[Scenario]) -> E2eResult<SuiteResult> {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            match self.run_scenario(scenario).await {
                Ok(result) => {
                    if result.success {
                        passed += 1;
                        info!("✓ {} ({} ms)", result.name, result.duration_ms);
                    } else {
                        failed += 1;
                        error!(
                            "✗ {} - {}",
                            result.name,
                            result.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                    results.push(result);
                }
                Err(e) => {
                    // Bootstrap or toolchain failure outside the browser
                    failed += 1;
                    error!("✗ {} - {}", scenario.name, e);
                    results.push(ScenarioResult {
                        name: scenario.name.clone(),
                        success: false,
                        duration_ms: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            "Suite results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        Ok(SuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            results,
        })
    }

    /// Run a single scenario: HTTP bootstrap, template rendering, one
    /// compiled browser script.
    pub async fn run_scenario(&self, scenario: &Scenario) -> E2eResult<ScenarioResult> {
        let start = Instant::now();
        debug!("Running scenario: {}", scenario.name);

        let mut ctx = TemplateContext::new(self.messages.clone());
        let prelude = self.bootstrap(scenario, &mut ctx).await?;

        let mut steps = prelude;
        for step in &scenario.steps {
            steps.push(self.render_step(step, &mut ctx)?);
        }

        let playwright = PlaywrightHandle::new(PlaywrightConfig {
            base_url: self.config.base_url.clone(),
            screenshot_dir: self.config.screenshot_dir.clone(),
            viewport_width: scenario.viewport.width,
            viewport_height: scenario.viewport.height,
            browser: self.config.browser,
            headless: self.config.headless,
        })?;

        let outcome = playwright.run_steps(&steps).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => Ok(ScenarioResult {
                name: scenario.name.clone(),
                success: true,
                duration_ms,
                error: None,
            }),
            Err(E2eError::Playwright(reason)) => Ok(ScenarioResult {
                name: scenario.name.clone(),
                success: false,
                duration_ms,
                error: Some(reason),
            }),
            Err(e) => Err(e),
        }
    }

    /// Establish the scenario's starting state over HTTP. Returns the
    /// browser prelude steps and fills the template context.
    async fn bootstrap(
        &self,
        scenario: &Scenario,
        ctx: &mut TemplateContext,
    ) -> E2eResult<Vec<Step>> {
        match &scenario.bootstrap {
            None => Ok(Vec::new()),
            Some(Bootstrap::CreateUser) => {
                let (user, token) = session::create_user(&self.api).await?;
                ctx.insert_user(&user, &token);
                Ok(Vec::new())
            }
            Some(Bootstrap::LoginViaApi { target, contacts }) => {
                let session = session::login_via_api(&self.api, target).await?;
                ctx.insert_user(&session.user, &session.token);

                for (i, seed) in contacts.iter().enumerate() {
                    let details = session::seed_details(seed);
                    session::seed_contact(&self.api, &session.token, &details).await?;
                    if i == 0 {
                        ctx.insert_contact(&details);
                    }
                }

                Ok(session.prelude)
            }
        }
    }

    /// Render every template placeholder in a step's string fields
    fn render_step(&self, step: &Step, ctx: &mut TemplateContext) -> E2eResult<Step> {
        let rendered = match step.clone() {
            Step::Navigate { path } => Step::Navigate {
                path: ctx.render(&path)?,
            },
            Step::Fill { id, value } => Step::Fill {
                id,
                value: ctx.render(&value)?,
            },
            Step::AssertText { id, text, exact } => Step::AssertText {
                id,
                text: ctx.render(&text)?,
                exact,
            },
            Step::AssertSelectorText {
                selector,
                text,
                exact,
            } => Step::AssertSelectorText {
                selector,
                text: ctx.render(&text)?,
                exact,
            },
            Step::AssertUrlContains { fragment } => Step::AssertUrlContains {
                fragment: ctx.render(&fragment)?,
            },
            Step::SetCookie { name, value } => Step::SetCookie {
                name,
                value: ctx.render(&value)?,
            },
            Step::AssertCookie { name, value } => Step::AssertCookie {
                name,
                value: ctx.render(&value)?,
            },
            Step::Log { message } => Step::Log {
                message: ctx.render(&message)?,
            },
            // No template-bearing fields
            other => other,
        };
        Ok(rendered)
    }

    /// Write suite results to a JSON file in the output directory
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("suite-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}
