use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// 统一的时间戳类型。
pub type Timestamp = DateTime<Utc>;

/// 会话凭证，由服务端生成的不可猜测随机令牌。
///
/// 令牌内容对核心完全不透明，只作为注册表的查找键使用；
/// 传输层（Cookie 等）如何携带它与领域模型无关。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// 经过验证的昵称。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_owned();
        if value.is_empty() {
            return Err(DomainError::invalid_argument("nickname", "cannot be empty"));
        }
        if value.len() > 50 {
            return Err(DomainError::invalid_argument("nickname", "too long"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 经过验证的消息内容。
///
/// 校验只要求去除首尾空白后非空，存储时保留原始文本。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid_argument("message", "cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickname_rejects_empty() {
        assert!(Nickname::parse("").is_err());
        assert!(Nickname::parse("   ").is_err());
    }

    #[test]
    fn nickname_is_trimmed() {
        let nickname = Nickname::parse("  alice  ").unwrap();
        assert_eq!(nickname.as_str(), "alice");
    }

    #[test]
    fn nickname_rejects_too_long() {
        let long = "x".repeat(51);
        assert!(Nickname::parse(long).is_err());
    }

    #[test]
    fn message_body_rejects_whitespace_only() {
        assert!(MessageBody::parse("").is_err());
        assert!(MessageBody::parse(" \t\n").is_err());
    }

    #[test]
    fn message_body_keeps_original_text() {
        let body = MessageBody::parse("  hello  ").unwrap();
        assert_eq!(body.as_str(), "  hello  ");
    }
}
