//! 领域模型错误定义
//!
//! 定义系统中所有可能的领域错误类型，提供清晰的错误上下文。
//! 这里的每一种错误都是可恢复的，由调用方决定如何提示用户。

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 昵称已被其他会话占用
    #[error("昵称 {nickname} 已被占用")]
    NicknameTaken { nickname: String },

    /// 会话尚未认领昵称
    #[error("会话尚未认领昵称")]
    NoNicknameClaimed,

    /// 参数校验错误
    #[error("参数校验失败: {field}: {reason}")]
    InvalidArgument { field: String, reason: String },
}

impl DomainError {
    /// 创建昵称占用错误
    pub fn nickname_taken(nickname: impl Into<String>) -> Self {
        Self::NicknameTaken {
            nickname: nickname.into(),
        }
    }

    /// 创建参数校验错误
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
