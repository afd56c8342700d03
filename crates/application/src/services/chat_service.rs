//! 聊天用例服务
//!
//! 串联身份注册表、消息日志和广播出口，对外提供
//! 认领昵称、发送消息、读取历史三个用例。

use std::sync::Arc;

use domain::{DomainError, Message, MessageBody, Nickname, SessionToken};

use crate::{
    broadcaster::{MessageBroadcast, MessageBroadcaster},
    clock::Clock,
    error::ApplicationError,
    message_log::MessageLog,
    registry::{ClaimOutcome, IdentityRegistry},
};

/// 认领昵称请求
#[derive(Debug, Clone)]
pub struct ClaimNicknameRequest {
    pub nickname: String,
    /// 请求携带的会话凭证，首次交互时为空
    pub credential: Option<String>,
}

/// 认领昵称响应
#[derive(Debug, Clone)]
pub struct ClaimResponse {
    /// 本次会话使用的凭证（可能是新生成的）
    pub credential: SessionToken,
    pub outcome: ClaimOutcome,
}

/// 发送消息请求
#[derive(Debug, Clone)]
pub struct SendMessageRequest {
    pub credential: String,
    pub body: String,
}

pub struct ChatServiceDependencies {
    pub registry: Arc<IdentityRegistry>,
    pub message_log: Arc<MessageLog>,
    pub clock: Arc<dyn Clock>,
    pub broadcaster: Arc<dyn MessageBroadcaster>,
}

pub struct ChatService {
    deps: ChatServiceDependencies,
}

impl ChatService {
    pub fn new(deps: ChatServiceDependencies) -> Self {
        Self { deps }
    }

    /// 认领昵称。请求未携带凭证时先为会话生成一个新凭证。
    pub async fn claim_nickname(
        &self,
        request: ClaimNicknameRequest,
    ) -> Result<ClaimResponse, ApplicationError> {
        let nickname = Nickname::parse(request.nickname)?;

        let credential = match request.credential {
            Some(value) => SessionToken::new(value),
            None => self.deps.registry.generate_credential().await,
        };

        let outcome = self
            .deps
            .registry
            .claim_nickname(nickname, &credential)
            .await?;

        tracing::info!(outcome = %outcome.description(), "昵称认领完成");

        Ok(ClaimResponse {
            credential,
            outcome,
        })
    }

    /// 发送消息：先提交到消息日志，再尽力广播。
    pub async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<Message, ApplicationError> {
        let credential = SessionToken::new(request.credential);

        let sender = self
            .deps
            .registry
            .resolve_nickname(&credential)
            .await
            .ok_or(DomainError::NoNicknameClaimed)?;

        let body = MessageBody::parse(request.body)?;

        let message = self
            .deps
            .message_log
            .append(sender, body, self.deps.clock.as_ref())
            .await;

        tracing::info!(chat = %message.formatted(), "CHAT");

        // 广播在日志提交之后、临界区之外进行。投递是尽力而为的：
        // 个别订阅者的失败不回滚日志，也不影响本次发送的结果。
        if let Err(broadcast_error) = self
            .deps
            .broadcaster
            .broadcast(MessageBroadcast::all(message.clone()))
            .await
        {
            tracing::warn!(error = %broadcast_error, "消息广播失败，已丢弃");
        }

        Ok(message)
    }

    /// 按插入顺序返回全部历史消息。
    pub async fn history(&self) -> Vec<Message> {
        self.deps.message_log.history().await
    }
}
