use axum::extract::{Json, State, rejection::JsonRejection};

use super::validate_credentials;
use crate::error::AppError;
use crate::models::{CreateUser, RegisterRequest, User};
use crate::response::ApiResponse;
use crate::state::AppState;

/// ユーザー登録ハンドラー
///
/// POST /register
///
/// # Security
/// - パスワードはログに出力しない
/// - パスワードはリポジトリでハッシュ化して保存
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ApiResponse<User>, AppError> {
    let Json(request) =
        payload.map_err(|e| AppError::bad_request("register user", e.body_text()))?;
    validate_credentials("register user", &request.login, &request.password)?;

    let id = state
        .user_repo
        .create(&CreateUser::from(request))
        .await
        .map_err(|e| AppError::internal("storage register/create user", e))?;

    let user = state
        .user_repo
        .get_by_id(id)
        .await
        .map_err(|e| AppError::internal("storage get by id user inside register", e))?;

    Ok(ApiResponse::created("create user", user))
}
