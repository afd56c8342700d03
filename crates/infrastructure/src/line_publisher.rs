//! TCP 行协议广播端点
//!
//! 订阅者建立 TCP 连接后，每条广播消息以单行文本帧推送：
//! `ALL <ISO-8601 时间戳> -- <昵称> -- <内容>\n`。
//! 端点绑定的地址在进程启动时公布一次，订阅者由此发现它。

use std::io;
use std::net::SocketAddr;

use application::MessageBroadcast;
use config::BroadcastConfig;
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    sync::broadcast,
};
use tracing::{debug, info, warn};

use crate::broadcast::ChannelMessageBroadcaster;

/// 面向外部订阅者的广播端点。
pub struct LinePublisher {
    listener: TcpListener,
    broadcaster: ChannelMessageBroadcaster,
}

impl LinePublisher {
    /// 绑定监听地址。端口为 0 时由系统分配随机端口。
    pub async fn bind(
        config: &BroadcastConfig,
        broadcaster: ChannelMessageBroadcaster,
    ) -> io::Result<Self> {
        let listener =
            TcpListener::bind((config.publish_host.as_str(), config.publish_port)).await?;
        info!(addr = %listener.local_addr()?, "广播端点已就绪");
        Ok(Self {
            listener,
            broadcaster,
        })
    }

    /// 实际绑定的地址。
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// 接收订阅者连接，每个连接由独立任务转发广播消息。
    ///
    /// 转发任务不持有注册表或消息日志的任何锁，
    /// 缓慢的订阅者只拖慢它自己。
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    debug!(peer = %peer, "订阅者已连接");
                    let receiver = self.broadcaster.subscribe();
                    tokio::spawn(forward(stream, peer, receiver));
                }
                Err(err) => {
                    warn!(error = %err, "接受订阅者连接失败");
                }
            }
        }
    }
}

/// 将广播消息逐行写给单个订阅者。
///
/// 断开或落后导致的失败只影响这一个订阅者，永远不会
/// 传播给触发广播的发送请求。
async fn forward(
    mut stream: TcpStream,
    peer: SocketAddr,
    mut receiver: broadcast::Receiver<MessageBroadcast>,
) {
    loop {
        match receiver.recv().await {
            Ok(payload) => {
                let mut line = payload.wire_line();
                line.push('\n');
                if let Err(err) = stream.write_all(line.as_bytes()).await {
                    warn!(peer = %peer, error = %err, "订阅者写入失败，断开连接");
                    return;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(peer = %peer, skipped, "订阅者落后，丢弃过旧消息");
            }
            Err(broadcast::error::RecvError::Closed) => {
                debug!(peer = %peer, "广播通道已关闭，结束转发");
                return;
            }
        }
    }
}
