//! 会话凭证的 Cookie 传输
//!
//! 凭证以名为 `cookie` 的 Cookie 在请求间携带；
//! 核心只关心令牌值本身，不解析任何传输细节。

use axum::http::{header, HeaderMap, HeaderValue};
use domain::SessionToken;

const COOKIE_NAME: &str = "cookie";

/// 从请求头中读取会话凭证。
pub fn extract(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == COOKIE_NAME).then(|| value.to_owned())
    })
}

/// 将会话凭证写回响应头。
pub fn attach(headers: &mut HeaderMap, credential: &SessionToken) {
    let cookie = format!("{}={}; Path=/", COOKIE_NAME, credential);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        headers.insert(header::SET_COOKIE, value);
    }
}
