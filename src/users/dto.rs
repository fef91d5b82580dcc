use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo::{Role, User};

/// Public view of a profile; credential fields never leave the repo layer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub created_at: OffsetDateTime,
}

impl From<User> for UserDetailsResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            user_name: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserDeleteResponse {
    pub id: Uuid,
    pub status: &'static str,
}
