use serde::{Deserialize, Serialize};

use crate::models::user::UserPublic;

/// Required fields are optional here so that a missing one is reported
/// alongside the others instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterIn {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// "trainer" or "user"; defaults to "user".
    pub role: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginIn {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub token: String,
    pub user: UserPublic,
}
