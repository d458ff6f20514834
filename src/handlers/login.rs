use axum::extract::{Json, State, rejection::JsonRejection};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse};
use crate::repositories::RepositoryError;
use crate::response::ApiResponse;
use crate::services::token::{self, ACCESS_TOKEN_TTL, TokenSubject};
use crate::state::AppState;

/// ログインハンドラー
///
/// POST /login
///
/// 処理フロー:
/// 1. リクエストのデコード
/// 2. login / password でユーザー照合
/// 3. 24 時間有効のアクセストークンを発行
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    // 1. リクエストのデコード
    let Json(request) = payload.map_err(|e| AppError::bad_request("login user", e.body_text()))?;

    // 2. ユーザー照合（不在・不一致はどちらも 400）
    let user = state
        .user_repo
        .get_by_login_password(&request.login, &request.password)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::bad_request("invalid password or login", e),
            e => AppError::internal("get by user login and password", e),
        })?;

    // 3. トークン発行
    let access_token = token::issue(
        &TokenSubject::from(&user),
        ACCESS_TOKEN_TTL,
        state.config.secret_key.expose_secret(),
    )
    .map_err(|e| AppError::internal("error while generating token", e))?;

    Ok(ApiResponse::ok("login user", LoginResponse { access_token }))
}
