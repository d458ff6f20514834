use serde::{Deserialize, Serialize};

use super::user::CreateUser;

/// ログインリクエスト（POST /login）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// ユーザー登録リクエスト（POST /register）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
    pub phone_number: String,
}

impl From<RegisterRequest> for CreateUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            login: request.login,
            password: request.password,
            phone_number: request.phone_number,
        }
    }
}

/// ログインレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}
