use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use secrecy::SecretBox;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use crate::app::create_router;
use crate::config::Config;
use crate::models::{CreateUser, ListUsers, UpdateUser, User, UserList};
use crate::repositories::{RepositoryError, UserRepository};
use crate::services::password;
use crate::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config(secret: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        postgres_host: "localhost".to_string(),
        postgres_port: 5432,
        postgres_user: "postgres".to_string(),
        postgres_password: SecretBox::new(Box::new("postgres".to_string())),
        postgres_database: "postgres".to_string(),
        postgres_max_connections: 1,
        default_offset: 0,
        default_limit: 10,
        secret_key: SecretBox::new(Box::new(secret.to_string())),
    }
}

pub fn app_with_repo(repo: Arc<dyn UserRepository>) -> Router {
    app_with_repo_and_secret(repo, TEST_SECRET)
}

pub fn app_with_repo_and_secret(repo: Arc<dyn UserRepository>, secret: &str) -> Router {
    create_router(AppState::new(test_config(secret), repo))
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Bytes) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&body).expect("serialize request body"),
            )),
        None => builder.body(Body::empty()),
    }
    .expect("build request");

    let response = app.oneshot(request).await.expect("handle request");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("read response body")
        .to_bytes();
    (status, body)
}

/// テスト用のインメモリ実装（挿入順を保持）
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &CreateUser) -> Result<Uuid, RepositoryError> {
        let now = OffsetDateTime::now_utc();
        let id = Uuid::new_v4();
        let record = User {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            login: user.login.clone(),
            password: password::hash_password(&user.password)?,
            phone_number: user.phone_number.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(record);
        Ok(id)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_login_password(
        &self,
        login: &str,
        password: &str,
    ) -> Result<User, RepositoryError> {
        let candidates: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.login == login)
            .cloned()
            .collect();

        for user in candidates {
            if password::verify_password(password, &user.password)? {
                return Ok(user);
            }
        }
        Err(RepositoryError::NotFound)
    }

    async fn get_list(&self, query: &ListUsers) -> Result<UserList, RepositoryError> {
        let search = query.search.to_lowercase();
        let users = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                search.is_empty()
                    || format!("{} {}", u.first_name, u.last_name)
                        .to_lowercase()
                        .contains(&search)
            })
            .skip(query.offset.max(0) as usize)
            .take(if query.limit > 0 {
                query.limit as usize
            } else {
                usize::MAX
            })
            .cloned()
            .collect();
        Ok(UserList::new(users))
    }

    async fn update(&self, user: &UpdateUser) -> Result<u64, RepositoryError> {
        let password_hash = password::hash_password(&user.password)?;
        let mut users = self.users.lock().unwrap();
        let Some(record) = users.iter_mut().find(|u| u.id == user.id) else {
            return Ok(0);
        };

        record.first_name = user.first_name.clone();
        record.last_name = user.last_name.clone();
        record.login = user.login.clone();
        record.password = password_hash;
        record.phone_number = user.phone_number.clone();
        record.updated_at = OffsetDateTime::now_utc();
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepositoryError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok((before - users.len()) as u64)
    }

    async fn close(&self) {}
}
