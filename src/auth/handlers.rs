use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{SigninRequest, SigninResponse, SignoutResponse, SignupRequest, SignupResponse},
        guard::BearerToken,
        services::{self, is_valid_email, SignupProfile},
    },
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/signin", post(signin))
        .route("/user/signout", post(signout))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();
    payload.user_name = payload.user_name.trim().to_string();

    if payload.user_name.is_empty() {
        return Err(ApiError::Validation("Username is required"));
    }
    if !is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::Validation("Password is required"));
    }

    let user = services::signup(
        &state.db,
        &SignupProfile {
            username: &payload.user_name,
            email: &payload.email,
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            password: &payload.password,
        },
    )
    .await?;

    Ok(Json(SignupResponse {
        id: user.id,
        status: "USER SUCCESSFULLY REGISTERED",
    }))
}

#[instrument(skip(state, payload))]
pub async fn signin(
    State(state): State<AppState>,
    Json(payload): Json<SigninRequest>,
) -> Result<(HeaderMap, Json<SigninResponse>), ApiError> {
    let (user, session) = services::signin(&state, &payload.user_name, &payload.password).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "access-token",
        session
            .access_token
            .parse()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("token header: {e}")))?,
    );

    Ok((
        headers,
        Json(SigninResponse {
            id: user.id,
            message: "SIGNED IN SUCCESSFULLY",
        }),
    ))
}

#[instrument(skip(state, token))]
pub async fn signout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<SignoutResponse>, ApiError> {
    let session = services::signout(&state.db, &token).await?;
    Ok(Json(SignoutResponse {
        id: session.user_id,
        message: "SIGNED OUT SUCCESSFULLY",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_accepts_camel_case() {
        let body = r#"{
            "userName": "alice",
            "email": "a@x.com",
            "firstName": "Alice",
            "lastName": "Archer",
            "password": "Pw1"
        }"#;
        let req: SignupRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.user_name, "alice");
        assert_eq!(req.email, "a@x.com");
    }

    #[test]
    fn signin_response_serializes_id_and_message() {
        let body = SigninResponse {
            id: uuid::Uuid::new_v4(),
            message: "SIGNED IN SUCCESSFULLY",
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("SIGNED IN SUCCESSFULLY"));
        assert!(json.contains("id"));
    }
}
