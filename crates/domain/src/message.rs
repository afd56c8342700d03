//! 消息实体定义
//!
//! 消息在追加进消息日志的那一刻创建一次，之后不可变更。

use serde::{Deserialize, Serialize};

use crate::value_objects::{MessageBody, Nickname, Timestamp};

/// 消息实体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// 消息落入日志时分配的时间戳
    pub timestamp: Timestamp,
    /// 发送者昵称
    pub sender: Nickname,
    /// 消息内容
    pub body: MessageBody,
}

impl Message {
    pub fn new(timestamp: Timestamp, sender: Nickname, body: MessageBody) -> Self {
        Self {
            timestamp,
            sender,
            body,
        }
    }

    /// 展示视图："<ISO-8601 时间戳> -- <昵称> -- <内容>"。
    ///
    /// 这是派生出来的格式化结果，不属于存储的记录本身，
    /// 任何消费方都可以自行重新计算。
    pub fn formatted(&self) -> String {
        format!(
            "{} -- {} -- {}",
            self.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f"),
            self.sender,
            self.body
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike, Utc};

    use super::*;

    #[test]
    fn formatted_joins_fields_with_double_dash() {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 45)
            .unwrap()
            .with_nanosecond(123_456_000)
            .unwrap();
        let message = Message::new(
            timestamp,
            Nickname::parse("alice").unwrap(),
            MessageBody::parse("hi").unwrap(),
        );

        assert_eq!(
            message.formatted(),
            "2024-05-01T12:30:45.123456 -- alice -- hi"
        );
    }
}
