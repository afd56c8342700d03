//! Web API 层。
//!
//! 提供 Axum 路由，将 HTTP 请求委托给应用层的用例服务，
//! 并负责会话凭证的 Cookie 传输。

mod credential;
mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
