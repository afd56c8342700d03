//! 主应用程序入口
//!
//! 启动 Axum Web API 服务与 TCP 广播端点。

use std::sync::Arc;

use application::{ChatService, ChatServiceDependencies, IdentityRegistry, MessageLog, SystemClock};
use config::AppConfig;
use infrastructure::{ChannelMessageBroadcaster, LinePublisher};
use tracing_subscriber::EnvFilter;
use web_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::from_env();

    // 核心状态在进程启动时构造一次，随后注入各请求处理器
    let registry = Arc::new(IdentityRegistry::new());
    let message_log = Arc::new(MessageLog::new());
    let clock: Arc<dyn application::Clock> = Arc::new(SystemClock::default());
    let broadcaster = ChannelMessageBroadcaster::new(config.broadcast.capacity);

    // 广播端点先于 HTTP 服务启动，绑定地址在此公布一次，
    // 订阅端由此发现它
    let publisher = LinePublisher::bind(&config.broadcast, broadcaster.clone()).await?;
    tracing::info!(addr = %publisher.local_addr()?, "广播端点地址");
    tokio::spawn(publisher.run());

    let chat_service = ChatService::new(ChatServiceDependencies {
        registry,
        message_log,
        clock,
        broadcaster: Arc::new(broadcaster),
    });

    let state = AppState::new(Arc::new(chat_service));
    let app = router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "聊天服务器已启动");
    axum::serve(listener, app).await?;

    Ok(())
}
