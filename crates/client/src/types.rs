//! Wire types for the Contact List API

use serde::{Deserialize, Serialize};

/// A user account submitted to `POST /users`.
///
/// Every field is required; the server rejects empty ones. The server
/// lowercases the email on its side, so response assertions compare
/// against the lowercased form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// A contact submitted to `POST /contacts` or `PUT /contacts/{id}`.
///
/// Only the names are required. Optional fields are omitted from the JSON
/// body entirely when unset, matching what the web form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// ISO date string, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// User record as echoed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Lowercased by the server regardless of the submitted casing
    pub email: String,
}

/// Body of a successful `POST /users` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserBody {
    pub user: UserRecord,
    pub token: String,
}

/// Contact record as echoed by the server, with its assigned id and owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street1: Option<String>,
    #[serde(default)]
    pub street2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_province: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_details_serialize_camel_case() {
        let user = UserDetails {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann.lee@example.com".into(),
            password: "Secret123".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["firstName"], "Ann");
        assert_eq!(json["lastName"], "Lee");
        assert_eq!(json["email"], "ann.lee@example.com");
        assert_eq!(json["password"], "Secret123");
    }

    #[test]
    fn contact_details_omit_unset_fields() {
        let contact = ContactDetails {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&contact).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2, "only the required names should be present");
        assert!(obj.contains_key("firstName"));
        assert!(obj.contains_key("lastName"));
    }

    #[test]
    fn contact_details_full_payload() {
        let contact = ContactDetails {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: Some("ann.lee@example.com".into()),
            birthdate: Some("1990-01-02".into()),
            phone: Some("5551234567".into()),
            street1: Some("1 Main St".into()),
            street2: Some("Apt 2".into()),
            city: Some("Springfield".into()),
            state_province: Some("IL".into()),
            postal_code: Some("62701".into()),
            country: Some("USA".into()),
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["stateProvince"], "IL");
        assert_eq!(json["postalCode"], "62701");
        assert_eq!(json["birthdate"], "1990-01-02");
    }

    #[test]
    fn create_user_body_round_trips_underscore_id() {
        let body = serde_json::json!({
            "user": {
                "_id": "6489b9a5f4e8a2001a1b2c3d",
                "firstName": "Ann",
                "lastName": "Lee",
                "email": "ann.lee@example.com",
            },
            "token": "abc123",
        });
        let parsed: CreateUserBody = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.user.id, "6489b9a5f4e8a2001a1b2c3d");
        assert_eq!(parsed.token, "abc123");
    }
}
