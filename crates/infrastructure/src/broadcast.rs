// 基于 tokio broadcast 通道的进程内广播器
use application::{BroadcastError, MessageBroadcast, MessageBroadcaster};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// 进程内消息广播器。
///
/// 投递是尽力而为的：没有订阅者时发送直接成功；
/// 落后超过通道容量的订阅者会丢失最旧的消息，而不会阻塞发送方。
#[derive(Clone)]
pub struct ChannelMessageBroadcaster {
    sender: broadcast::Sender<MessageBroadcast>,
}

impl ChannelMessageBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// 新订阅者只会收到订阅之后发布的消息，历史需另行读取。
    pub fn subscribe(&self) -> broadcast::Receiver<MessageBroadcast> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl MessageBroadcaster for ChannelMessageBroadcaster {
    async fn broadcast(&self, payload: MessageBroadcast) -> Result<(), BroadcastError> {
        if self.sender.receiver_count() == 0 {
            return Ok(());
        }
        self.sender
            .send(payload)
            .map_err(|err| BroadcastError::failed(err.to_string()))?;
        Ok(())
    }
}
