use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::guard::BearerToken,
    error::ApiError,
    state::AppState,
    users::{
        dto::{UserDeleteResponse, UserDetailsResponse},
        services,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/userprofile/:user_id", get(user_profile))
        .route("/admin/user/:user_id", delete(delete_user))
}

#[instrument(skip(state, token))]
pub async fn user_profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDetailsResponse>, ApiError> {
    let user = services::user_profile(&state.db, &token, user_id).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state, token))]
pub async fn delete_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserDeleteResponse>, ApiError> {
    let id = services::delete_user(&state.db, &token, user_id).await?;
    Ok(Json(UserDeleteResponse {
        id,
        status: "USER SUCCESSFULLY DELETED",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::{Role, User};
    use time::OffsetDateTime;

    #[test]
    fn profile_response_hides_credential() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "a@x.com".into(),
            first_name: "Alice".into(),
            last_name: "Archer".into(),
            role: Role::NonAdmin,
            password_hash: "$argon2id$...".into(),
            password_salt: "somesalt".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let body: UserDetailsResponse = user.into();
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("alice"));
        assert!(!json.contains("argon2"));
        assert!(!json.contains("somesalt"));
    }
}
