//! User domain model.
//!
//! Represents the authenticated identity record returned by the auth
//! collaborator and cached for the lifetime of a logged-in run.

use serde::{Deserialize, Serialize};

/// The identity record for an authenticated user.
///
/// Serialized in camelCase to match the wire format of the remote API and
/// the persisted user snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier (server-assigned, opaque)
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl User {
    /// The name shown in conversation lists and headers.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_wire_form() {
        let json = r#"{
            "id": "u1",
            "email": "bob@example.com",
            "username": "bob",
            "firstName": "Bob",
            "lastName": "Stone",
            "avatar": "https://cdn.example.com/a.png"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.first_name, "Bob");
        assert_eq!(user.avatar.as_deref(), Some("https://cdn.example.com/a.png"));
        assert!(user.phone.is_none());
    }

    #[test]
    fn display_name_joins_first_and_last() {
        let json = r#"{"id":"u1","email":"e","username":"u","firstName":"Ada","lastName":"Byron"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "Ada Byron");
    }
}
