use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

/// Closed set of business outcomes this service can report to a client.
///
/// Every variant carries a stable short code and message; both are part of
/// the API contract, so clients can tell "not signed in" from "signed out"
/// even though both map to 401.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Try any other Username, this Username has already been taken")]
    DuplicateUsername,
    #[error("This user has already been registered, try with any other emailId")]
    DuplicateEmail,
    #[error("This username does not exist")]
    UnknownUser,
    #[error("Password failed")]
    BadCredential,
    #[error("User is not Signed in")]
    NotSignedIn,
    #[error("User has not signed in")]
    Unauthenticated,
    #[error("User is signed out. Sign in first to perform this action")]
    SessionExpired,
    #[error("Only the owner or an admin may perform this action")]
    Forbidden,
    #[error("User with entered uuid does not exist")]
    UserNotFound,
    #[error("Entered question uuid does not exist")]
    QuestionNotFound,
    #[error("Entered answer uuid does not exist")]
    AnswerNotFound,
    /// Boundary-level input rejection (malformed or missing fields). Not one
    /// of the coded business outcomes.
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::DuplicateUsername => Some("SGR-001"),
            ApiError::DuplicateEmail => Some("SGR-002"),
            ApiError::UnknownUser => Some("ATH-001"),
            ApiError::BadCredential => Some("ATH-002"),
            ApiError::NotSignedIn => Some("SGO-001"),
            ApiError::Unauthenticated => Some("ATHR-001"),
            ApiError::SessionExpired => Some("ATHR-002"),
            ApiError::Forbidden => Some("ATHR-003"),
            ApiError::UserNotFound => Some("USR-001"),
            ApiError::QuestionNotFound => Some("QUES-001"),
            ApiError::AnswerNotFound => Some("ANS-001"),
            ApiError::Validation(_) => None,
            ApiError::Internal(_) => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateUsername | ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::UnknownUser
            | ApiError::BadCredential
            | ApiError::NotSignedIn
            | ApiError::Unauthenticated
            | ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::UserNotFound | ApiError::QuestionNotFound | ApiError::AnswerNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            // Infrastructure failures are logged here and not surfaced verbatim.
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            code: self.code(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ApiError::DuplicateUsername.code(), Some("SGR-001"));
        assert_eq!(ApiError::DuplicateEmail.code(), Some("SGR-002"));
        assert_eq!(ApiError::UnknownUser.code(), Some("ATH-001"));
        assert_eq!(ApiError::BadCredential.code(), Some("ATH-002"));
        assert_eq!(ApiError::NotSignedIn.code(), Some("SGO-001"));
        assert_eq!(ApiError::Unauthenticated.code(), Some("ATHR-001"));
        assert_eq!(ApiError::SessionExpired.code(), Some("ATHR-002"));
        assert_eq!(ApiError::Forbidden.code(), Some("ATHR-003"));
        assert_eq!(ApiError::UserNotFound.code(), Some("USR-001"));
        assert_eq!(ApiError::QuestionNotFound.code(), Some("QUES-001"));
        assert_eq!(ApiError::AnswerNotFound.code(), Some("ANS-001"));
    }

    #[test]
    fn status_mapping_matches_contract() {
        assert_eq!(ApiError::DuplicateUsername.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::UnknownUser.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::BadCredential.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotSignedIn.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::SessionExpired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::QuestionNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::AnswerNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
