//! 聊天服务核心领域模型
//!
//! 包含消息实体、会话凭证、昵称等值对象，以及相关的校验规则。

pub mod errors;
pub mod message;
pub mod value_objects;

pub use errors::*;
pub use message::*;
pub use value_objects::*;
