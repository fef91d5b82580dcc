use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::guard::BearerToken,
    error::ApiError,
    questions::{
        dto::{QuestionDetailsResponse, QuestionRequest, QuestionResponse},
        repo::Question,
        services,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/question/create", post(create_question))
        .route("/question/all", get(all_questions))
        .route("/question/all/:user_id", get(questions_by_user))
        .route("/question/edit/:question_id", put(edit_question))
        .route("/question/delete/:question_id", delete(delete_question))
}

fn details(q: Question) -> QuestionDetailsResponse {
    QuestionDetailsResponse {
        id: q.id,
        content: q.content,
        owner_id: q.user_id,
        created_at: q.created_at,
    }
}

#[instrument(skip(state, token, payload))]
pub async fn create_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::Validation("Question content is required"));
    }
    let question = services::create_question(&state.db, &token, &payload.content).await?;
    Ok(Json(QuestionResponse {
        id: question.id,
        status: "QUESTION CREATED",
    }))
}

#[instrument(skip(state, token))]
pub async fn all_questions(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
    let questions = services::all_questions(&state.db, &token).await?;
    Ok(Json(questions.into_iter().map(details).collect()))
}

#[instrument(skip(state, token))]
pub async fn questions_by_user(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<QuestionDetailsResponse>>, ApiError> {
    let questions = services::questions_by_user(&state.db, &token, user_id).await?;
    Ok(Json(questions.into_iter().map(details).collect()))
}

#[instrument(skip(state, token, payload))]
pub async fn edit_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<QuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::Validation("Question content is required"));
    }
    let question = services::edit_question(&state.db, &token, question_id, &payload.content).await?;
    Ok(Json(QuestionResponse {
        id: question.id,
        status: "QUESTION EDITED",
    }))
}

#[instrument(skip(state, token))]
pub async fn delete_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
) -> Result<Json<QuestionResponse>, ApiError> {
    services::delete_question(&state.db, &token, question_id).await?;
    Ok(Json(QuestionResponse {
        id: question_id,
        status: "QUESTION DELETED",
    }))
}
