use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Staff role. Variants are declared in ascending privilege order so the
/// derived `Ord` doubles as the privilege comparison.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Manager,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn at_least(self, minimum: Role) -> bool {
        self >= minimum
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller, resolved from the session token and handed to
/// every use case explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ordered_by_privilege() {
        assert!(Role::Manager < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);
        assert!(Role::SuperAdmin.at_least(Role::Admin));
        assert!(!Role::Manager.at_least(Role::Admin));
        assert!(Role::Manager.at_least(Role::Manager));
    }

    #[test]
    fn role_serializes_in_screaming_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");
        let parsed: Role = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(parsed, Role::Manager);
    }

    #[test]
    fn hashed_password_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            email: "staff@example.nl".into(),
            name: "Staff".into(),
            hashed_password: "$argon2id$secret".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("hashedPassword").is_none());
        assert_eq!(value["role"], "ADMIN");
    }
}
