//! 统一配置中心
//!
//! 提供应用的全局配置管理，包括：
//! - HTTP 服务设置
//! - 广播端点设置

use serde::{Deserialize, Serialize};
use std::env;

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 广播配置
    pub broadcast: BroadcastConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 广播器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastConfig {
    /// 广播通道容量，落后超过容量的订阅者会丢失最旧的消息
    pub capacity: usize,
    /// 广播端点监听地址
    pub publish_host: String,
    /// 广播端点监听端口，0 表示由系统分配随机端口
    pub publish_port: u16,
}

impl AppConfig {
    /// 从环境变量加载配置，未设置时使用开发默认值
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
            },
            broadcast: BroadcastConfig {
                capacity: env::var("BROADCAST_CAPACITY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(256),
                publish_host: env::var("PUBLISH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                publish_port: env::var("PUBLISH_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0),
            },
        }
    }
}
