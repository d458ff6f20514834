use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CreateUser, ListUsers, UpdateUser, User, UserList};
use crate::services::password::{self, PasswordError};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("no rows in result set")]
    NotFound,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// ユーザーストレージの抽象
///
/// 更新・削除で 0 行だった場合もエラーにはせず、件数を返す（判定は呼び出し側）
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを作成し、生成した id を返す
    async fn create(&self, user: &CreateUser) -> Result<Uuid, RepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepositoryError>;

    /// ログイン名とパスワードでユーザーを取得
    ///
    /// ユーザー不在・パスワード不一致はどちらも `NotFound`
    async fn get_by_login_password(
        &self,
        login: &str,
        password: &str,
    ) -> Result<User, RepositoryError>;

    async fn get_list(&self, query: &ListUsers) -> Result<UserList, RepositoryError>;

    async fn update(&self, user: &UpdateUser) -> Result<u64, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError>;

    /// コネクションを閉じる（シャットダウン時）
    async fn close(&self);
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// ILIKE の部分一致パターンを作る（ワイルドカードはエスケープ）
pub(crate) fn search_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn positive(value: i64) -> Option<i64> {
    (value > 0).then_some(value)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &CreateUser) -> Result<Uuid, RepositoryError> {
        let id = Uuid::new_v4();
        let password_hash = password::hash_password(&user.password)?;

        sqlx::query(
            r#"
            INSERT INTO users (id, first_name, last_name, login, password, phone_number, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            "#,
        )
        .bind(id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.login)
        .bind(&password_hash)
        .bind(&user.phone_number)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, login, password, phone_number, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_login_password(
        &self,
        login: &str,
        password: &str,
    ) -> Result<User, RepositoryError> {
        // login に一意制約はないため、同じ login の行を順に照合する
        let candidates = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, login, password, phone_number, created_at, updated_at
            FROM users
            WHERE login = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(login)
        .fetch_all(&self.pool)
        .await?;

        if candidates.is_empty() {
            password::verify_dummy(password);
            tracing::warn!(login = %login, "認証失敗: ユーザー不在");
            return Err(RepositoryError::NotFound);
        }

        for user in candidates {
            if password::verify_password(password, &user.password)? {
                return Ok(user);
            }
        }

        tracing::warn!(login = %login, "認証失敗: パスワード不一致");
        Err(RepositoryError::NotFound)
    }

    async fn get_list(&self, query: &ListUsers) -> Result<UserList, RepositoryError> {
        // OFFSET NULL / LIMIT NULL は句なしと同じ扱い
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, login, password, phone_number, created_at, updated_at
            FROM users
            WHERE $1::text IS NULL OR (first_name || ' ' || last_name) ILIKE $1
            ORDER BY created_at, id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind((!query.search.is_empty()).then(|| search_pattern(&query.search)))
        .bind(positive(query.offset))
        .bind(positive(query.limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(UserList::new(users))
    }

    async fn update(&self, user: &UpdateUser) -> Result<u64, RepositoryError> {
        let password_hash = password::hash_password(&user.password)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                first_name = $2,
                last_name = $3,
                login = $4,
                password = $5,
                phone_number = $6,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.login)
        .bind(&password_hash)
        .bind(&user.phone_number)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_wraps_term() {
        assert_eq!(search_pattern("Shokh"), "%Shokh%");
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_positive_disables_non_positive_values() {
        assert_eq!(positive(0), None);
        assert_eq!(positive(-3), None);
        assert_eq!(positive(2), Some(2));
    }
}
