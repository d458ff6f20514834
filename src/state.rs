use std::sync::Arc;

use crate::config::Config;
use crate::repositories::UserRepository;

/// アプリケーション共有状態
///
/// axum の State として全ハンドラーで共有される。
/// 設定は読み取り専用、リポジトリはコネクションプールを保持する。
#[derive(Clone)]
pub struct AppState {
    /// アプリケーション設定（Arc で共有）
    pub config: Arc<Config>,
    /// ユーザーリポジトリ（テスト時は差し替え可能）
    pub user_repo: Arc<dyn UserRepository>,
}

impl AppState {
    /// 新しい AppState を作成
    pub fn new(config: Config, user_repo: Arc<dyn UserRepository>) -> Self {
        Self {
            config: Arc::new(config),
            user_repo,
        }
    }
}
