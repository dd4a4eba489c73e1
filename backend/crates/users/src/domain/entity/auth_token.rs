//! Auth Token Entity
//!
//! One record per issued bearer token. A user holds one token per login,
//! so several devices can stay signed in at once. The bearer string itself
//! is the signed token ID (see `application::token`); nothing secret is
//! stored here.

use chrono::{DateTime, Utc};
use kernel::id::{TokenId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token_id: TokenId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn issue_for(user_id: UserId) -> Self {
        Self {
            token_id: TokenId::new(),
            user_id,
            created_at: Utc::now(),
        }
    }
}
