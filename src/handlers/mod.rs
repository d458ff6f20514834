use std::num::ParseIntError;

use crate::error::AppError;

pub mod login;
pub mod register;
pub mod user;

pub use login::login;
pub use register::register;
pub use user::{create_user, delete_user, get_user_by_id, get_user_list, update_user};

/// クエリ値を数値に変換（未指定・空文字なら設定値を使う）
fn parse_or_default(raw: Option<&str>, default: i64) -> Result<i64, ParseIntError> {
    match raw {
        None | Some("") => Ok(default),
        Some(value) => value.parse(),
    }
}

/// ユーザー項目のバリデーション（login / password は必須）
fn validate_credentials(description: &str, login: &str, password: &str) -> Result<(), AppError> {
    if login.trim().is_empty() {
        return Err(AppError::bad_request(description, "login is required"));
    }
    if password.is_empty() {
        return Err(AppError::bad_request(description, "password is required"));
    }
    Ok(())
}
