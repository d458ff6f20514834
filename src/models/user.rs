use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// ユーザー
///
/// password にはハッシュ（PHC 文字列）のみを保持し、レスポンスには含めない
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    #[serde(skip)]
    pub password: String,
    pub phone_number: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// ユーザー作成リクエスト（POST /user）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
    pub phone_number: String,
}

/// ユーザー更新リクエスト（PUT /user/{id}）
///
/// ボディに id が含まれていても無視し、常にパスの id を使う
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
    pub phone_number: String,
}

/// リポジトリに渡す更新内容
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub login: String,
    pub password: String,
    pub phone_number: String,
}

impl UpdateUser {
    pub fn new(id: Uuid, request: UpdateUserRequest) -> Self {
        Self {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            login: request.login,
            password: request.password,
            phone_number: request.phone_number,
        }
    }
}

/// 一覧取得条件
///
/// offset / limit は 0 以下なら句自体を付けない
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUsers {
    pub offset: i64,
    pub limit: i64,
    pub search: String,
}

/// 一覧取得結果
///
/// count は返却した件数であり、条件に一致する総件数ではない
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: usize,
}

impl UserList {
    pub fn new(users: Vec<User>) -> Self {
        let count = users.len();
        Self { users, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Shokhrukh".to_string(),
            last_name: "Safarov".to_string(),
            login: "webslinger".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RWh6".to_string(),
            phone_number: "+998900976035".to_string(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let json = serde_json::to_value(sample_user()).expect("serialize user");

        assert!(json.get("password").is_none());
        assert_eq!(json["login"], "webslinger");
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn test_user_list_count_matches_returned_rows() {
        let list = UserList::new(vec![sample_user(), sample_user()]);
        assert_eq!(list.count, 2);

        let empty = UserList::new(Vec::new());
        assert_eq!(empty.count, 0);
    }

    #[test]
    fn test_update_user_takes_id_from_argument() {
        let id = Uuid::new_v4();
        let request: UpdateUserRequest = serde_json::from_value(serde_json::json!({
            "id": "not-the-path-id",
            "first_name": "A",
            "last_name": "B",
            "login": "ab",
            "password": "secret",
            "phone_number": "+1"
        }))
        .expect("deserialize update request");

        let update = UpdateUser::new(id, request);
        assert_eq!(update.id, id);
        assert_eq!(update.login, "ab");
    }

    #[test]
    fn test_create_user_requires_all_fields() {
        let result: Result<CreateUser, _> = serde_json::from_value(serde_json::json!({
            "first_name": "A",
            "login": "ab"
        }));
        assert!(result.is_err());
    }
}
