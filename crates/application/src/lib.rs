//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，处理输入校验、并发控制、
//! 以及对外部适配器（例如消息广播）的抽象。

pub mod broadcaster;
pub mod clock;
pub mod error;
pub mod message_log;
pub mod registry;
pub mod services;

pub use broadcaster::{BroadcastError, BroadcastScope, MessageBroadcast, MessageBroadcaster};
pub use clock::{Clock, SystemClock};
pub use error::ApplicationError;
pub use message_log::MessageLog;
pub use registry::{ClaimOutcome, IdentityRegistry};
pub use services::{
    ChatService, ChatServiceDependencies, ClaimNicknameRequest, ClaimResponse, SendMessageRequest,
};
