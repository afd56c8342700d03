use std::fmt;

use async_trait::async_trait;
use domain::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 广播作用域标签。
///
/// 目前只有全员广播，保留封闭枚举的形式以便将来扩展按房间投递。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastScope {
    All,
}

impl fmt::Display for BroadcastScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
        }
    }
}

/// 广播负载：一条已提交的消息及其投递作用域。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBroadcast {
    pub scope: BroadcastScope,
    pub message: Message,
}

impl MessageBroadcast {
    pub fn all(message: Message) -> Self {
        Self {
            scope: BroadcastScope::All,
            message,
        }
    }

    /// 订阅端收到的单行文本帧："<作用域> <格式化消息>"。
    pub fn wire_line(&self) -> String {
        format!("{} {}", self.scope, self.message.formatted())
    }
}

#[derive(Debug, Error)]
pub enum BroadcastError {
    #[error("broadcast failed: {0}")]
    Failed(String),
}

impl BroadcastError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// 抽象的广播出口。
///
/// 每次成功追加消息后恰好调用一次；具体传输（进程内通道、
/// TCP 端点）由基础设施层提供，可以整体替换而不触及核心。
#[async_trait]
pub trait MessageBroadcaster: Send + Sync {
    async fn broadcast(&self, payload: MessageBroadcast) -> Result<(), BroadcastError>;
}
