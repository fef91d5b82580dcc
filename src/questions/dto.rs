use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub id: Uuid,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDetailsResponse {
    pub id: Uuid,
    pub content: String,
    pub owner_id: Uuid,
    pub created_at: OffsetDateTime,
}
