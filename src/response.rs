use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// 全レスポンス共通の形式
///
/// フィールド名（`Desciption` の綴りを含む）はクライアントとの互換のためそのまま
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "Status")]
    pub status: u16,
    #[serde(rename = "Desciption")]
    pub description: String,
    #[serde(rename = "Data")]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, description: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            description: description.into(),
            data,
        }
    }
}

/// 成功レスポンス（2xx はログに出さない）
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, description: impl Into<String>, data: T) -> Self {
        Self {
            status,
            envelope: Envelope::new(status, description, data),
        }
    }

    pub fn ok(description: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, description, data)
    }

    pub fn created(description: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, description, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        // 204 はボディを持てない
        if self.status == StatusCode::NO_CONTENT {
            return self.status.into_response();
        }
        (self.status, Json(self.envelope)).into_response()
    }
}
