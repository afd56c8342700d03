use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use application::{ClaimNicknameRequest, SendMessageRequest};
use domain::{Message, SessionToken};

use crate::{credential, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
struct ClaimNickPayload {
    nickname: String,
}

#[derive(Debug, Deserialize)]
struct SendMessagePayload {
    message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/claim-nick", post(claim_nick))
        .route("/send-message", post(send_message))
        .route("/chat-history", get(chat_history))
        .route("/ping", get(ping))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn claim_nick(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<ClaimNickPayload>,
) -> Result<Response, ApiError> {
    tracing::info!(nickname = %payload.nickname, "收到昵称认领请求");

    let response = state
        .chat_service
        .claim_nickname(ClaimNicknameRequest {
            nickname: payload.nickname,
            credential: credential::extract(&headers),
        })
        .await?;

    let mut http = (
        StatusCode::OK,
        format!("{}\n", response.outcome.description()),
    )
        .into_response();
    credential::attach(http.headers_mut(), &response.credential);
    Ok(http)
}

async fn send_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<SendMessagePayload>,
) -> Result<Response, ApiError> {
    let Some(token) = credential::extract(&headers) else {
        tracing::debug!("发送请求缺少会话凭证");
        return Err(ApiError::bad_request("Erroneous request"));
    };

    state
        .chat_service
        .send_message(SendMessageRequest {
            credential: token.clone(),
            body: payload.message,
        })
        .await?;

    let mut http = (StatusCode::OK, "Message sent successfully.\n").into_response();
    credential::attach(http.headers_mut(), &SessionToken::new(token));
    Ok(http)
}

async fn chat_history(State(state): State<AppState>) -> Json<Vec<String>> {
    let history = state.chat_service.history().await;
    Json(history.iter().map(Message::formatted).collect())
}

async fn ping() -> &'static str {
    "pongers\n"
}
