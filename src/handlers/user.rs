use axum::{
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{parse_or_default, validate_credentials};
use crate::error::AppError;
use crate::models::{CreateUser, ListUsers, UpdateUser, UpdateUserRequest, User, UserList};
use crate::response::ApiResponse;
use crate::state::AppState;

/// 一覧取得のクエリパラメータ（数値変換はハンドラー側で行う）
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// ユーザー作成ハンドラー
///
/// POST /user
///
/// 作成と再取得は別々のクエリで実行される（トランザクションなし）。
/// 間に削除が入った場合は再取得が失敗し 500 になる。
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUser>, JsonRejection>,
) -> Result<ApiResponse<User>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::bad_request("create user", e.body_text()))?;
    validate_credentials("create user", &request.login, &request.password)?;

    let id = state
        .user_repo
        .create(&request)
        .await
        .map_err(|e| AppError::internal("storage create user", e))?;

    let user = state
        .user_repo
        .get_by_id(id)
        .await
        .map_err(|e| AppError::internal("storage get by id user", e))?;

    Ok(ApiResponse::created("create user", user))
}

/// ユーザー取得ハンドラー
///
/// GET /user/{id}
///
/// 存在しない場合も他のストレージエラーと区別せず 500 を返す
pub async fn get_user_by_id(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ApiResponse<User>, AppError> {
    let Path(id) = id.map_err(|e| AppError::bad_request("get by id user", e.body_text()))?;

    let user = state
        .user_repo
        .get_by_id(id)
        .await
        .map_err(|e| AppError::internal("storage get by id user", e))?;

    Ok(ApiResponse::ok("get by id user", user))
}

/// ユーザー一覧ハンドラー
///
/// GET /user?offset=&limit=&search=
pub async fn get_user_list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<ApiResponse<UserList>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request("get list user", e.body_text()))?;

    let offset = parse_or_default(query.offset.as_deref(), state.config.default_offset)
        .map_err(|_| AppError::bad_request("get list user", "invalid offset"))?;
    let limit = parse_or_default(query.limit.as_deref(), state.config.default_limit)
        .map_err(|_| AppError::bad_request("get list user", "invalid limit"))?;
    let search = query.search.unwrap_or_default();
    // PostgreSQL の text は NUL を保持できない
    if search.contains('\0') {
        return Err(AppError::bad_request("get list user", "invalid search"));
    }

    let list = state
        .user_repo
        .get_list(&ListUsers {
            offset,
            limit,
            search,
        })
        .await
        .map_err(|e| AppError::internal("storage get list user", e))?;

    Ok(ApiResponse::ok("get list user", list))
}

/// ユーザー更新ハンドラー
///
/// PUT /user/{id}
///
/// 0 行更新（該当 id なし）は 400 "no rows affected"
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiResponse<User>, AppError> {
    let Path(id) = id.map_err(|e| AppError::bad_request("update user", e.body_text()))?;
    let Json(request) = payload.map_err(|e| AppError::bad_request("update user", e.body_text()))?;
    validate_credentials("update user", &request.login, &request.password)?;

    let rows_affected = state
        .user_repo
        .update(&UpdateUser::new(id, request))
        .await
        .map_err(|e| AppError::internal("storage update user", e))?;

    if rows_affected == 0 {
        return Err(AppError::bad_request("storage update user", "no rows affected"));
    }

    let user = state
        .user_repo
        .get_by_id(id)
        .await
        .map_err(|e| AppError::internal("storage get by id user", e))?;

    Ok(ApiResponse::ok("update user", user))
}

/// ユーザー削除ハンドラー
///
/// DELETE /user/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ApiResponse<&'static str>, AppError> {
    let Path(id) = id.map_err(|e| AppError::bad_request("delete user", e.body_text()))?;

    let rows_affected = state
        .user_repo
        .delete(id)
        .await
        .map_err(|e| AppError::internal("storage delete user", e))?;

    if rows_affected == 0 {
        return Err(AppError::bad_request("storage delete user", "no rows affected"));
    }

    Ok(ApiResponse::new(
        StatusCode::NO_CONTENT,
        "delete user",
        "Deleted Successfully",
    ))
}
