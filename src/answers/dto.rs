use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetailsResponse {
    pub id: Uuid,
    pub question_id: Uuid,
    pub question_content: String,
    pub answer_content: String,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
}
