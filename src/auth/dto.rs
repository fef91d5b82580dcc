use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for account registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Request body for sign-in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: Uuid,
    pub status: &'static str,
}

/// Body of a successful sign-in. The bearer token itself travels in the
/// `access-token` response header, not here.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub id: Uuid,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SignoutResponse {
    pub id: Uuid,
    pub message: &'static str,
}
