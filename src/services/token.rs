use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::models::User;

/// ログイン時に発行するアクセストークンの有効期間
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(24);

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token secret is empty")]
    EmptySecret,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// トークンに埋め込むユーザー情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSubject {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone_number: user.phone_number.clone(),
        }
    }
}

/// JWT ペイロード
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub subject: TokenSubject,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 で署名したアクセストークンを発行
///
/// exp は発行時刻 + ttl
pub fn issue(subject: &TokenSubject, ttl: Duration, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::EmptySecret);
    }

    let now = OffsetDateTime::now_utc();
    let claims = TokenClaims {
        subject: subject.clone(),
        iat: now.unix_timestamp(),
        exp: (now + ttl).unix_timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    tracing::debug!(user_id = %subject.id, "アクセストークン発行");
    Ok(token)
}
