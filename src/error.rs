use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::response::Envelope;

/// ハンドラーが返すエラー
///
/// description は処理名、message は元のエラー内容（レスポンスの Data に入る）
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{description}: {message}")]
    BadRequest {
        description: String,
        message: String,
    },

    #[error("{description}: {message}")]
    Internal {
        description: String,
        message: String,
    },
}

impl AppError {
    pub fn bad_request(description: impl Into<String>, message: impl Display) -> Self {
        Self::BadRequest {
            description: description.into(),
            message: message.to_string(),
        }
    }

    pub fn internal(description: impl Into<String>, message: impl Display) -> Self {
        Self::Internal {
            description: description.into(),
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (description, message) = match self {
            Self::BadRequest {
                description,
                message,
            }
            | Self::Internal {
                description,
                message,
            } => (description, message),
        };

        let envelope = Envelope::new(status, description, message);
        tracing::error!(
            operation = %envelope.description,
            response = ?envelope,
            "エラーレスポンス"
        );

        (status, Json(envelope)).into_response()
    }
}
