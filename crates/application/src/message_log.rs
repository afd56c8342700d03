//! 消息日志
//!
//! 仅追加的有序消息序列，插入顺序即成功发送的时间顺序。
//! 不支持删除、重排或去重。

use tokio::sync::RwLock;

use domain::{Message, MessageBody, Nickname};

use crate::clock::Clock;

/// 进程生命周期内的消息日志。
///
/// 追加经由写锁串行化，时间戳在临界区内分配，
/// 因此日志位置递增蕴含时间戳非递减（允许相等，不允许倒序）。
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: RwLock<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
        }
    }

    /// 追加一条消息并返回创建的记录。
    ///
    /// 内容校验由调用方负责，日志本身接受任何已构造的消息体。
    pub async fn append(&self, sender: Nickname, body: MessageBody, clock: &dyn Clock) -> Message {
        let mut messages = self.messages.write().await;
        let message = Message::new(clock.now(), sender, body);
        messages.push(message.clone());
        message
    }

    /// 按插入顺序返回全部消息的时点快照。
    ///
    /// 快照要么包含一条完整的消息，要么完全不包含，不存在撕裂读。
    pub async fn history(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }
}
