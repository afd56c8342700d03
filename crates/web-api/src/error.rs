use application::ApplicationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;

/// HTTP 边界错误：状态码加纯文本响应体。
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, format!("{}\n", self.message)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Domain(DomainError::NicknameTaken { nickname }) => ApiError::new(
                StatusCode::CONFLICT,
                format!("Nickname {} is already in use. Try another one.", nickname),
            ),
            ApplicationError::Domain(DomainError::NoNicknameClaimed) => ApiError::unauthorized(
                "You need to claim a nickname to be allowed to send messages!",
            ),
            ApplicationError::Domain(DomainError::InvalidArgument { field, reason }) => {
                ApiError::bad_request(format!("{}: {}", field, reason))
            }
            ApplicationError::Broadcast(err) => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("broadcast failed: {}", err),
            ),
        }
    }
}
