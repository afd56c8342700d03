//! 会话身份注册表
//!
//! 维护会话凭证到昵称的一对一绑定，昵称在整个注册表范围内唯一。
//! 绑定关系只允许通过 [`IdentityRegistry::claim_nickname`] 变更。

use std::collections::HashMap;

use rand::{distr::Alphanumeric, Rng};
use tokio::sync::RwLock;

use domain::{DomainError, Nickname, SessionToken};

/// 凭证令牌长度（字母数字字符数）。
const TOKEN_LENGTH: usize = 128;

/// 认领昵称的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// 该昵称已经注册在当前会话名下，重复认领不改变任何状态
    AlreadyYours { nickname: Nickname },
    /// 昵称空闲，认领成功
    Claimed { nickname: Nickname },
    /// 当前会话原有的昵称被替换，旧昵称即刻释放
    Replaced {
        previous: Nickname,
        nickname: Nickname,
    },
}

impl ClaimOutcome {
    /// 面向调用方的响应文案。
    pub fn description(&self) -> String {
        match self {
            Self::AlreadyYours { nickname } => {
                format!("Nickname {} is registered to you", nickname)
            }
            Self::Claimed { nickname } => format!("Claimed nickname {}", nickname),
            Self::Replaced { previous, nickname } => {
                format!("Replaced nickname {} with {}", previous, nickname)
            }
        }
    }
}

/// 会话凭证到昵称的注册表。
///
/// 进程启动时构造一次，通过 `Arc` 注入各请求处理器，
/// 不使用进程级单例。
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    accounts: RwLock<HashMap<SessionToken, Nickname>>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// 生成一个新的会话凭证，保证与注册表中已登记的凭证不同。
    ///
    /// 碰撞概率接近于零，但通过重新生成来处理，而不是假设不会发生。
    /// 生成本身不会向注册表写入任何状态。
    pub async fn generate_credential(&self) -> SessionToken {
        let accounts = self.accounts.read().await;
        loop {
            let token = random_token();
            if !accounts.contains_key(&token) {
                return token;
            }
            tracing::debug!("凭证生成发生碰撞，重新生成");
        }
    }

    /// 认领昵称：检查与绑定在同一个写锁临界区内完成。
    ///
    /// 同一昵称的并发认领由写锁裁定出唯一赢家，
    /// 落败方得到 [`DomainError::NicknameTaken`]。
    pub async fn claim_nickname(
        &self,
        nickname: Nickname,
        credential: &SessionToken,
    ) -> Result<ClaimOutcome, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.get(credential) == Some(&nickname) {
            return Ok(ClaimOutcome::AlreadyYours { nickname });
        }

        if accounts.values().any(|held| held == &nickname) {
            return Err(DomainError::nickname_taken(nickname.as_str()));
        }

        match accounts.insert(credential.clone(), nickname.clone()) {
            Some(previous) => Ok(ClaimOutcome::Replaced { previous, nickname }),
            None => Ok(ClaimOutcome::Claimed { nickname }),
        }
    }

    /// 查询会话当前绑定的昵称。未认领过昵称时返回 `None`。
    pub async fn resolve_nickname(&self, credential: &SessionToken) -> Option<Nickname> {
        self.accounts.read().await.get(credential).cloned()
    }
}

fn random_token() -> SessionToken {
    let token: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    SessionToken::new(token)
}
