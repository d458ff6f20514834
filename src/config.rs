use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    // PostgreSQL 接続設定
    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: SecretBox<String>,
    pub postgres_database: String,
    #[serde(default = "default_postgres_max_connections")]
    pub postgres_max_connections: u32,

    // 一覧取得のデフォルト値（クエリ未指定時に使用）
    #[serde(default = "default_offset")]
    pub default_offset: i64,
    #[serde(default = "default_limit")]
    pub default_limit: i64,

    /// アクセストークン署名用シークレット
    pub secret_key: SecretBox<String>,
}

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POSTGRES_HOST: &str = "localhost";
const DEFAULT_POSTGRES_PORT: u16 = 5432;
const DEFAULT_POSTGRES_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_OFFSET: i64 = 0;
const DEFAULT_LIMIT: i64 = 10;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_postgres_host() -> String {
    DEFAULT_POSTGRES_HOST.to_string()
}

fn default_postgres_port() -> u16 {
    DEFAULT_POSTGRES_PORT
}

fn default_postgres_max_connections() -> u32 {
    DEFAULT_POSTGRES_MAX_CONNECTIONS
}

fn default_offset() -> i64 {
    DEFAULT_OFFSET
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Config {
    pub fn load() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// 個別の接続設定から PostgreSQL 接続オプションを構築
    pub fn pg_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .username(&self.postgres_user)
            .password(self.postgres_password.expose_secret())
            .database(&self.postgres_database)
    }
}
