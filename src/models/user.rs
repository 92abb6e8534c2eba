use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role, fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Trainer,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trainer => "trainer",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trainer" => Ok(Role::Trainer),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Row of the `users` table. The password hash never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub bio: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub bio: String,
    pub avatar: String,
}

/// Profile fields exposed when a user is expanded into another record
/// (plan author, followed trainer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
}

/// What the owner sees about themselves, and what login returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub bio: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_trainer(&self) -> bool {
        self.role == Role::Trainer
    }

    pub fn profile(&self) -> PublicProfile {
        PublicProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            bio: self.bio.clone(),
            avatar: self.avatar.clone(),
        }
    }

    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            bio: self.bio.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_column_text() {
        assert_eq!("trainer".parse::<Role>().unwrap(), Role::Trainer);
        assert_eq!(Role::User.to_string(), "user");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn public_views_omit_the_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "John Fitness".into(),
            email: "john@trainer.com".into(),
            password_hash: "$argon2id$secret".into(),
            role: Role::Trainer,
            bio: String::new(),
            avatar: String::new(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user.public()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"role\":\"trainer\""));
        assert!(json.contains("createdAt"));
    }
}
