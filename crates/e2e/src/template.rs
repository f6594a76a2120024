//! Template values for scenario strings
//!
//! Scenario YAML may embed `{{key}}` placeholders, resolved per run:
//!
//! - `{{user.*}}` and `{{token}}` come from the bootstrap,
//! - `{{contact.*}}` from the first seeded contact,
//! - `{{messages.<dotted>}}` from the expected-message fixture,
//! - `{{random.*}}` are generated fresh for the scenario and memoized,
//!   so the same key renders the same value in every later step.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use contactlist_client::profile;
use contactlist_client::{ContactDetails, UserDetails};

use crate::error::{E2eError, E2eResult};
use crate::messages::Messages;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder regex"));

/// Per-scenario template values
#[derive(Debug, Clone)]
pub struct TemplateContext {
    values: HashMap<String, String>,
    messages: Messages,
}

impl TemplateContext {
    pub fn new(messages: Messages) -> Self {
        Self {
            values: HashMap::new(),
            messages,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Expose a bootstrap-created user as `user.*` and `token`
    pub fn insert_user(&mut self, user: &UserDetails, token: &str) {
        self.insert("user.first_name", &user.first_name);
        self.insert("user.last_name", &user.last_name);
        self.insert("user.email", &user.email);
        self.insert("user.email_lower", user.email.to_lowercase());
        self.insert("user.password", &user.password);
        self.insert("token", token);
    }

    /// Expose a seeded contact as `contact.*`
    pub fn insert_contact(&mut self, contact: &ContactDetails) {
        self.insert("contact.first_name", &contact.first_name);
        self.insert("contact.last_name", &contact.last_name);
        let optional = [
            ("contact.email", &contact.email),
            ("contact.birthdate", &contact.birthdate),
            ("contact.phone", &contact.phone),
            ("contact.street1", &contact.street1),
            ("contact.street2", &contact.street2),
            ("contact.city", &contact.city),
            ("contact.state_province", &contact.state_province),
            ("contact.postal_code", &contact.postal_code),
            ("contact.country", &contact.country),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                self.insert(key, value);
            }
        }
        if let Some(email) = &contact.email {
            self.insert("contact.email_lower", email.to_lowercase());
        }
    }

    fn generate_random(kind: &str) -> Option<String> {
        let value = match kind {
            "first_name" => profile::random_user().first_name,
            "last_name" => profile::random_user().last_name,
            "email" => profile::random_user().email,
            "password" => profile::random_password(),
            "birthdate" => profile::random_birthdate(),
            "phone" => profile::random_phone(),
            "street1" => profile::random_contact().street1?,
            "street2" => profile::random_contact().street2?,
            "city" => profile::random_contact().city?,
            "state_province" => profile::random_contact().state_province?,
            "postal_code" => profile::random_contact().postal_code?,
            "country" => profile::random_contact().country?,
            _ => return None,
        };
        Some(value)
    }

    fn resolve(&mut self, key: &str) -> E2eResult<String> {
        if let Some(value) = self.values.get(key) {
            return Ok(value.clone());
        }
        if let Some(dotted) = key.strip_prefix("messages.") {
            return self.messages.require(dotted).map(str::to_owned);
        }
        if let Some(kind) = key.strip_prefix("random.") {
            if let Some(value) = Self::generate_random(kind) {
                // Memoized so repeated references agree within a scenario
                self.values.insert(key.to_string(), value.clone());
                return Ok(value);
            }
        }
        Err(E2eError::UnknownTemplateKey(key.to_string()))
    }

    /// Replace every `{{key}}` in `input`
    pub fn render(&mut self, input: &str) -> E2eResult<String> {
        let mut out = String::with_capacity(input.len());
        let mut last = 0;
        // Capture positions first; resolution needs &mut self
        let captures: Vec<(usize, usize, String)> = PLACEHOLDER
            .captures_iter(input)
            .map(|c| {
                let m = c.get(0).expect("match 0");
                (m.start(), m.end(), c[1].to_string())
            })
            .collect();

        for (start, end, key) in captures {
            out.push_str(&input[last..start]);
            out.push_str(&self.resolve(&key)?);
            last = end;
        }
        out.push_str(&input[last..]);
        Ok(out)
    }
}
