//! Playwright browser automation
//!
//! Scenarios compile to a single JavaScript program driving
//! `require('playwright')`, staged in a temp directory and executed with
//! `node`. One browser launch covers a whole scenario so context state
//! (the session cookie above all) survives across steps. Assertions are
//! emitted as plain checks that `throw`, which keeps the script runnable
//! without the `@playwright/test` harness.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::scenario::Step;
use crate::selectors::by_id;

/// Playwright browser handle
pub struct PlaywrightHandle {
    base_url: String,
    screenshot_dir: PathBuf,
    viewport_width: u32,
    viewport_height: u32,
    browser: Browser,
    headless: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> E2eResult<Self> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::Playwright(format!("unknown browser: {other}"))),
        }
    }
}

/// Escape a string for embedding in a single-quoted JS literal
fn js_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;

        std::fs::create_dir_all(&config.screenshot_dir)?;

        Ok(Self {
            base_url: config.base_url,
            screenshot_dir: config.screenshot_dir,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            browser: config.browser,
            headless: config.headless,
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Build the Playwright program for a sequence of steps
    pub fn build_script(&self, steps: &[Step]) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"
const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();
  // The app confirms destructive actions with window.confirm
  page.on('dialog', dialog => {{ dialog.accept().catch(() => {{}}); }});
  const baseUrl = {base_url};

  try {{
"#,
            browser = self.browser.as_str(),
            headless = self.headless,
            width = self.viewport_width,
            height = self.viewport_height,
            base_url = js_str(&self.base_url),
        ));

        for (i, step) in steps.iter().enumerate() {
            script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step.name()));
            script.push_str(&self.step_to_js(step));
            script.push('\n');
        }

        script.push_str(
            r#"
    console.log(JSON.stringify({ success: true }));
  } catch (error) {
    console.error(JSON.stringify({ success: false, error: error.message, stack: error.stack }));
    process.exit(1);
  } finally {
    await browser.close();
  }
})();
"#,
        );

        script
    }

    fn text_assertion(selector: &str, text: &str, exact: bool, step: &str) -> String {
        let sel = js_str(selector);
        let expected = js_str(text);
        let check = if exact {
            "actual.trim() === expected"
        } else {
            "actual.includes(expected)"
        };
        format!(
            r#"    {{
      const el = page.locator({sel}).first();
      await el.waitFor({{ state: 'visible', timeout: 5000 }});
      const tag = await el.evaluate(e => e.tagName.toLowerCase());
      const actual = (tag === 'input' || tag === 'textarea')
        ? await el.inputValue()
        : ((await el.textContent()) ?? '');
      const expected = {expected};
      if (!({check})) {{
        throw new Error('{step} failed for ' + {sel} + ': got "' + actual + '"');
      }}
    }}"#
        )
    }

    /// Convert a step to JavaScript code
    fn step_to_js(&self, step: &Step) -> String {
        match step {
            Step::Navigate { path } => {
                format!("    await page.goto(baseUrl + {});", js_str(path))
            }
            Step::Click { id, timeout_ms } => {
                let timeout = timeout_ms.unwrap_or(5000);
                format!(
                    "    await page.click({}, {{ timeout: {timeout} }});",
                    js_str(&by_id(id))
                )
            }
            Step::Fill { id, value } => {
                format!(
                    "    await page.fill({}, {});",
                    js_str(&by_id(id)),
                    js_str(value)
                )
            }
            Step::Wait { id, timeout_ms } => {
                format!(
                    "    await page.waitForSelector({}, {{ state: 'visible', timeout: {timeout_ms} }});",
                    js_str(&by_id(id))
                )
            }
            Step::Sleep { ms } => {
                format!("    await page.waitForTimeout({ms});")
            }
            Step::AssertVisible { id } => {
                format!(
                    "    await page.waitForSelector({}, {{ state: 'visible', timeout: 5000 }});",
                    js_str(&by_id(id))
                )
            }
            Step::AssertMissing { id, timeout_ms } => {
                format!(
                    "    await page.waitForSelector({}, {{ state: 'detached', timeout: {timeout_ms} }});",
                    js_str(&by_id(id))
                )
            }
            Step::AssertText { id, text, exact } => {
                Self::text_assertion(&by_id(id), text, *exact, "assert_text")
            }
            Step::AssertUrlContains { fragment } => {
                format!(
                    "    await page.waitForURL(url => url.href.includes({}), {{ timeout: 5000 }});",
                    js_str(fragment)
                )
            }
            Step::Reload => "    await page.reload();".to_string(),
            Step::ClickSelector { selector } => {
                format!("    await page.click({}, {{ timeout: 5000 }});", js_str(selector))
            }
            Step::AssertSelectorText {
                selector,
                text,
                exact,
            } => Self::text_assertion(selector, text, *exact, "assert_selector_text"),
            Step::SetCookie { name, value } => {
                format!(
                    "    await context.addCookies([{{ name: {}, value: {}, url: baseUrl }}]);",
                    js_str(name),
                    js_str(value)
                )
            }
            Step::AssertCookie { name, value } => {
                let name_js = js_str(name);
                let value_js = js_str(value);
                format!(
                    r#"    {{
      const cookies = await context.cookies();
      const cookie = cookies.find(c => c.name === {name_js});
      if (!cookie || cookie.value !== {value_js}) {{
        throw new Error('cookie ' + {name_js} + ' was not applied with the expected value');
      }}
    }}"#
                )
            }
            Step::Screenshot { name } => {
                let path = self.screenshot_dir.join(format!("{name}.png"));
                format!(
                    "    await page.screenshot({{ path: {}, fullPage: true }});",
                    js_str(&path.to_string_lossy())
                )
            }
            Step::Log { message } => {
                format!("    console.log('[TEST] ' + {});", js_str(message))
            }
        }
    }

    /// Execute the full script via node
    pub async fn run_script(&self, script: &str) -> E2eResult<()> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("scenario.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        // Run from the workspace so require('playwright') resolves against
        // the local node_modules
        let output = TokioCommand::new("node")
            .arg(&script_path)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(E2eError::Playwright(format!(
                "Script failed:\nstdout: {stdout}\nstderr: {stderr}"
            )));
        }

        Ok(())
    }

    /// Compile and execute a sequence of steps
    pub async fn run_steps(&self, steps: &[Step]) -> E2eResult<()> {
        let script = self.build_script(steps);
        self.run_script(&script).await
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub browser: Browser,
    pub headless: bool,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{contact_list, login};

    fn handle() -> PlaywrightHandle {
        // Bypasses the installed-check; build_script needs no toolchain
        PlaywrightHandle {
            base_url: "https://example.test".to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            viewport_width: 1280,
            viewport_height: 720,
            browser: Browser::Chromium,
            headless: true,
        }
    }

    #[test]
    fn js_str_escapes_quotes_and_backslashes() {
        assert_eq!(js_str("O'Brien"), r"'O\'Brien'");
        assert_eq!(js_str(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn script_uses_id_equality_selectors() {
        let script = handle().build_script(&[
            Step::Navigate { path: "/".into() },
            Step::Fill {
                id: login::INPUT_EMAIL.into(),
                value: "ann.lee@example.com".into(),
            },
            Step::Click {
                id: login::SUBMIT_BUTTON.into(),
                timeout_ms: None,
            },
        ]);
        assert!(script.contains(r#"await page.goto(baseUrl + '/');"#));
        assert!(script.contains(r#"page.fill('[id="email"]', 'ann.lee@example.com')"#));
        assert!(script.contains(r#"page.click('[id="submit"]', { timeout: 5000 })"#));
    }

    #[test]
    fn script_launches_one_browser_per_scenario() {
        let script = handle().build_script(&[
            Step::Navigate { path: "/".into() },
            Step::Reload,
        ]);
        assert_eq!(script.matches("chromium.launch").count(), 1);
        assert_eq!(script.matches("browser.close()").count(), 1);
    }

    #[test]
    fn cookie_steps_target_the_context() {
        let script = handle().build_script(&[
            Step::SetCookie {
                name: "token".into(),
                value: "tok123".into(),
            },
            Step::AssertCookie {
                name: "token".into(),
                value: "tok123".into(),
            },
        ]);
        assert!(script
            .contains("context.addCookies([{ name: 'token', value: 'tok123', url: baseUrl }])"));
        assert!(script.contains("const cookies = await context.cookies();"));
        assert!(script.contains("cookie.value !== 'tok123'"));
    }

    #[test]
    fn exact_and_contains_assertions_differ() {
        let contains = handle().build_script(&[Step::AssertText {
            id: login::ERROR_MESSAGE.into(),
            text: "User validation failed:".into(),
            exact: false,
        }]);
        assert!(contains.contains("actual.includes(expected)"));

        let exact = handle().build_script(&[Step::AssertSelectorText {
            selector: format!("{} td", contact_list::ROW_SELECTOR),
            text: "Ann Lee".into(),
            exact: true,
        }]);
        assert!(exact.contains("actual.trim() === expected"));
    }

    #[test]
    fn browser_parses_from_str() {
        assert_eq!("firefox".parse::<Browser>().unwrap(), Browser::Firefox);
        assert!("edge".parse::<Browser>().is_err());
    }
}
