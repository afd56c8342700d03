//! 广播投递集成测试
//!
//! 覆盖进程内通道的扇出与丢弃语义，以及 TCP 行协议端点。

use std::time::Duration;

use application::{MessageBroadcast, MessageBroadcaster};
use chrono::TimeZone;
use config::BroadcastConfig;
use domain::{Message, MessageBody, Nickname};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::broadcast::error::RecvError;

use infrastructure::{ChannelMessageBroadcaster, LinePublisher};

fn test_message(body: &str) -> Message {
    Message::new(
        chrono::Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        Nickname::parse("alice").unwrap(),
        MessageBody::parse(body).unwrap(),
    )
}

fn test_config() -> BroadcastConfig {
    BroadcastConfig {
        capacity: 16,
        publish_host: "127.0.0.1".to_string(),
        publish_port: 0,
    }
}

/// 等待订阅者连接被接受并挂上通道。
async fn wait_for_subscribers(broadcaster: &ChannelMessageBroadcaster, expected: usize) {
    for _ in 0..200 {
        if broadcaster.subscriber_count() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("subscribers never attached");
}

#[tokio::test]
async fn fanout_reaches_all_subscribers() {
    let broadcaster = ChannelMessageBroadcaster::new(16);
    let mut first = broadcaster.subscribe();
    let mut second = broadcaster.subscribe();

    broadcaster
        .broadcast(MessageBroadcast::all(test_message("hello")))
        .await
        .unwrap();

    let line = first.recv().await.unwrap().wire_line();
    assert!(line.starts_with("ALL "));
    assert!(line.ends_with("-- alice -- hello"));
    assert_eq!(second.recv().await.unwrap().wire_line(), line);
}

#[tokio::test]
async fn broadcast_without_subscribers_succeeds() {
    let broadcaster = ChannelMessageBroadcaster::new(16);

    let result = broadcaster
        .broadcast(MessageBroadcast::all(test_message("into the void")))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn lagged_subscriber_drops_oldest_messages() {
    let broadcaster = ChannelMessageBroadcaster::new(2);
    let mut subscriber = broadcaster.subscribe();

    for i in 0..5 {
        broadcaster
            .broadcast(MessageBroadcast::all(test_message(&i.to_string())))
            .await
            .unwrap();
    }

    // 容量为 2，前 3 条被丢弃
    match subscriber.recv().await {
        Err(RecvError::Lagged(skipped)) => assert_eq!(skipped, 3),
        other => panic!("expected lag, got {:?}", other.map(|p| p.wire_line())),
    }
    assert_eq!(subscriber.recv().await.unwrap().message.body.as_str(), "3");
    assert_eq!(subscriber.recv().await.unwrap().message.body.as_str(), "4");
}

#[tokio::test]
async fn tcp_subscriber_receives_wire_lines() {
    let broadcaster = ChannelMessageBroadcaster::new(16);
    let publisher = LinePublisher::bind(&test_config(), broadcaster.clone())
        .await
        .unwrap();
    let addr = publisher.local_addr().unwrap();
    tokio::spawn(publisher.run());

    let stream = TcpStream::connect(addr).await.unwrap();
    wait_for_subscribers(&broadcaster, 1).await;

    let payload = MessageBroadcast::all(test_message("over tcp"));
    let expected = format!("{}\n", payload.wire_line());
    broadcaster.broadcast(payload).await.unwrap();

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();
    assert_eq!(line, expected);
}

#[tokio::test]
async fn disconnected_subscriber_does_not_affect_others() {
    let broadcaster = ChannelMessageBroadcaster::new(16);
    let publisher = LinePublisher::bind(&test_config(), broadcaster.clone())
        .await
        .unwrap();
    let addr = publisher.local_addr().unwrap();
    tokio::spawn(publisher.run());

    let doomed = TcpStream::connect(addr).await.unwrap();
    let survivor = TcpStream::connect(addr).await.unwrap();
    wait_for_subscribers(&broadcaster, 2).await;

    drop(doomed);

    broadcaster
        .broadcast(MessageBroadcast::all(test_message("first")))
        .await
        .unwrap();
    broadcaster
        .broadcast(MessageBroadcast::all(test_message("second")))
        .await
        .unwrap();

    let mut reader = BufReader::new(survivor);
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();
    assert!(line.ends_with("-- alice -- first\n"));
    line.clear();
    reader.read_line(&mut line).await.unwrap();
    assert!(line.ends_with("-- alice -- second\n"));
}
