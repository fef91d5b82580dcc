use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    answers::{
        dto::{AnswerDetailsResponse, AnswerRequest, AnswerResponse},
        services,
    },
    auth::guard::BearerToken,
    error::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/question/:question_id/answer/create", post(create_answer))
        .route("/answer/edit/:answer_id", put(edit_answer))
        .route("/answer/delete/:answer_id", delete(delete_answer))
        .route("/answer/all/:question_id", get(answers_for_question))
}

#[instrument(skip(state, token, payload))]
pub async fn create_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::Validation("Answer content is required"));
    }
    let answer = services::create_answer(&state.db, &token, question_id, &payload.content).await?;
    Ok(Json(AnswerResponse {
        id: answer.id,
        status: "ANSWER CREATED",
    }))
}

#[instrument(skip(state, token, payload))]
pub async fn edit_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(answer_id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::Validation("Answer content is required"));
    }
    let answer = services::edit_answer(&state.db, &token, answer_id, &payload.content).await?;
    Ok(Json(AnswerResponse {
        id: answer.id,
        status: "ANSWER EDITED",
    }))
}

#[instrument(skip(state, token))]
pub async fn delete_answer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(answer_id): Path<Uuid>,
) -> Result<Json<AnswerResponse>, ApiError> {
    services::delete_answer(&state.db, &token, answer_id).await?;
    Ok(Json(AnswerResponse {
        id: answer_id,
        status: "ANSWER DELETED",
    }))
}

#[instrument(skip(state, token))]
pub async fn answers_for_question(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(question_id): Path<Uuid>,
) -> Result<Json<Vec<AnswerDetailsResponse>>, ApiError> {
    let (question, answers) =
        services::answers_for_question(&state.db, &token, question_id).await?;
    let items = answers
        .into_iter()
        .map(|a| AnswerDetailsResponse {
            id: a.id,
            question_id: question.id,
            question_content: question.content.clone(),
            answer_content: a.content,
            owner_id: a.user_id,
            created_at: a.created_at,
        })
        .collect();
    Ok(Json(items))
}
