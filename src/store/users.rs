use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A registered account.
///
/// `password` holds the Argon2id PHC string produced at signup, never the
/// text the user submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    #[must_use]
    pub fn new(username: String, email: String, password: String) -> Self {
        Self {
            id: None,
            username,
            email,
            password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_new_user_has_no_id() {
        let user = User::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            "$argon2id$stub".to_string(),
        );

        assert!(user.id.is_none());
    }

    #[test]
    fn test_serialize_skips_unset_id() {
        let user = User::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            "$argon2id$stub".to_string(),
        );

        let document = bson::to_document(&user).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("username").unwrap(), "alice");
        assert_eq!(document.get_str("email").unwrap(), "a@x.com");
        assert_eq!(document.get_str("password").unwrap(), "$argon2id$stub");
    }

    #[test]
    fn test_deserialize_with_id() {
        let id = ObjectId::new();
        let document = bson::doc! {
            "_id": id,
            "username": "alice",
            "email": "a@x.com",
            "password": "$argon2id$stub",
        };

        let user: User = bson::from_document(document).unwrap();

        assert_eq!(user.id, Some(id));
        assert_eq!(user.username, "alice");
    }
}
