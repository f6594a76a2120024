//! Synthetic profile generation
//!
//! Every test case works on a freshly generated user and contact so runs
//! never collide on the shared hosted application. Emails carry a random
//! suffix to stay unique across runs.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{ContactDetails, UserDetails};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Edsger", "Barbara", "Donald", "Radia", "Ken", "Margaret", "Dennis",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Dijkstra", "Liskov", "Knuth", "Perlman", "Thompson",
    "Hamilton", "Ritchie",
];

const STREETS: &[&str] = &[
    "Main St", "Oak Ave", "Maple Dr", "Cedar Ln", "Elm St", "Park Rd",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverton", "Fairview", "Georgetown", "Ashland", "Milton",
];

const STATES: &[&str] = &["CA", "NY", "TX", "WA", "IL", "OR"];

const COUNTRIES: &[&str] = &["USA", "Canada", "Ireland", "Australia"];

fn suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

fn pick<'a>(values: &[&'a str]) -> &'a str {
    values
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(values[0])
}

/// Random email guaranteed unique per call
pub fn random_email(first_name: &str, last_name: &str) -> String {
    format!(
        "{}.{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        suffix(8)
    )
}

/// Random password meeting the application's length requirement (7..100)
pub fn random_password() -> String {
    suffix(12)
}

/// A fresh, fully populated user profile with a unique email
pub fn random_user() -> UserDetails {
    let first_name = pick(FIRST_NAMES).to_string();
    let last_name = pick(LAST_NAMES).to_string();
    let email = random_email(&first_name, &last_name);
    UserDetails {
        first_name,
        last_name,
        email,
        password: random_password(),
    }
}

/// Random birthdate as an ISO `YYYY-MM-DD` string
pub fn random_birthdate() -> String {
    let mut rng = rand::thread_rng();
    let year = rng.gen_range(1950..=2005);
    let month = rng.gen_range(1..=12);
    // Capped at 28 so every month is valid
    let day = rng.gen_range(1..=28);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Random 10-digit phone number
pub fn random_phone() -> String {
    let mut rng = rand::thread_rng();
    (0..10).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

/// A contact with every field populated
pub fn random_contact() -> ContactDetails {
    let mut rng = rand::thread_rng();
    let first_name = pick(FIRST_NAMES).to_string();
    let last_name = pick(LAST_NAMES).to_string();
    let email = random_email(&first_name, &last_name);
    ContactDetails {
        first_name,
        last_name,
        email: Some(email),
        birthdate: Some(random_birthdate()),
        phone: Some(random_phone()),
        street1: Some(format!("{} {}", rng.gen_range(1..1000), pick(STREETS))),
        street2: Some(format!("Apt {}", rng.gen_range(1..100))),
        city: Some(pick(CITIES).to_string()),
        state_province: Some(pick(STATES).to_string()),
        postal_code: Some(format!("{:05}", rng.gen_range(10000..99999))),
        country: Some(pick(COUNTRIES).to_string()),
    }
}

/// A contact carrying only the fields the edit-flow scenarios need
pub fn minimal_contact() -> ContactDetails {
    let first_name = pick(FIRST_NAMES).to_string();
    let last_name = pick(LAST_NAMES).to_string();
    let email = random_email(&first_name, &last_name);
    ContactDetails {
        first_name,
        last_name,
        email: Some(email),
        birthdate: Some(random_birthdate()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn random_user_is_well_formed() {
        let user = random_user();
        assert!(!user.first_name.is_empty());
        assert!(!user.last_name.is_empty());
        assert!(user.email.contains('@'));
        assert_eq!(user.email, user.email.to_lowercase());
        assert!(user.password.len() >= 7 && user.password.len() < 100);
    }

    #[test]
    fn random_emails_are_unique() {
        let emails: HashSet<String> = (0..100).map(|_| random_user().email).collect();
        assert_eq!(emails.len(), 100);
    }

    #[test]
    fn random_birthdate_is_iso_shaped() {
        let date = random_birthdate();
        assert_eq!(date.len(), 10);
        let parts: Vec<&str> = date.split('-').collect();
        assert_eq!(parts.len(), 3);
        let month: u32 = parts[1].parse().unwrap();
        let day: u32 = parts[2].parse().unwrap();
        assert!((1..=12).contains(&month));
        assert!((1..=28).contains(&day));
    }

    #[test]
    fn random_phone_is_ten_digits() {
        let phone = random_phone();
        assert_eq!(phone.len(), 10);
        assert!(phone.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn random_contact_fills_every_field() {
        let contact = random_contact();
        assert!(contact.email.is_some());
        assert!(contact.birthdate.is_some());
        assert!(contact.phone.is_some());
        assert!(contact.street1.is_some());
        assert!(contact.street2.is_some());
        assert!(contact.city.is_some());
        assert!(contact.state_province.is_some());
        assert!(contact.postal_code.is_some());
        assert!(contact.country.is_some());
    }
}
