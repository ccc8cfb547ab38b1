use redis::{ErrorKind, RedisError};
use thiserror::Error;

use crate::config::ValidationError;

/// 儲存客戶端錯誤
#[derive(Error, Debug)]
pub enum StoreError {
    /// 執行環境缺少所需的客戶端能力（例如未編譯 TLS 支援）
    #[error("儲存客戶端不可用: {0}")]
    Environment(String),

    /// 連線、認證或傳輸錯誤
    #[error("儲存連線錯誤: {0}")]
    Connection(#[source] RedisError),

    /// 呼叫參數不合法，未送出任何命令
    #[error("{operation} 參數錯誤: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// 伺服器回報的命令錯誤，原樣保留
    #[error("儲存命令錯誤: {0}")]
    Command(#[source] RedisError),

    /// 配置驗證失敗
    #[error("無效的儲存配置: {0}")]
    InvalidConfig(#[from] ValidationError),

    /// 配置加載失敗
    #[error("配置加載錯誤: {0}")]
    Config(#[from] config::ConfigError),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    /// 建立連線階段的錯誤分類
    pub(crate) fn from_connect(err: RedisError) -> Self {
        if err.kind() == ErrorKind::InvalidClientConfig {
            StoreError::Environment(err.to_string())
        } else {
            StoreError::Connection(err)
        }
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }

    /// 伺服器回報的錯誤碼，例如 `WRONGTYPE`
    pub fn command_code(&self) -> Option<&str> {
        match self {
            StoreError::Command(err) => err.code(),
            _ => None,
        }
    }
}

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_dropped()
            || err.is_connection_refusal()
            || err.is_timeout()
        {
            StoreError::Connection(err)
        } else {
            StoreError::Command(err)
        }
    }
}
