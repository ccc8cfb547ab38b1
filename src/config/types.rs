use std::fmt;
use std::time::Duration;

use redis::{ConnectionInfo, IntoConnectionInfo, RedisResult};
use serde::{Deserialize, Serialize};

use crate::config::validation::{ValidationError, ValidationUtils, Validator};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 6379;

const URL_SCHEMES: [&str; 4] = ["redis://", "rediss://", "redis+unix://", "unix://"];

/// 完整設定檔結構
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl Validator for Settings {
    fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

/// 儲存連線配置
///
/// 所有欄位皆可省略，缺少時使用預設值 (`127.0.0.1:6379`，無密碼)。
/// 設定 `url` 時會忽略 host/port/password/db。
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub db: i64,
    pub url: Option<String>,
    pub connection_timeout_secs: Option<u64>,
    pub read_timeout_secs: Option<u64>,
    pub write_timeout_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: String::new(),
            db: 0,
            url: None,
            connection_timeout_secs: None,
            read_timeout_secs: None,
            write_timeout_secs: None,
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &password)
            .field("db", &self.db)
            .field("url", &self.url.as_ref().map(|_| "***"))
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .field("read_timeout_secs", &self.read_timeout_secs)
            .field("write_timeout_secs", &self.write_timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    /// 以主機與連接埠建立配置，其餘使用預設值
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// 連線目標描述，日誌用，不含密碼
    pub fn endpoint(&self) -> String {
        match &self.url {
            Some(_) => "<url>".to_string(),
            None => format!("{}:{}/{}", self.host, self.port, self.db),
        }
    }

    pub fn connection_timeout(&self) -> Option<Duration> {
        self.connection_timeout_secs.map(Duration::from_secs)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        self.write_timeout_secs.map(Duration::from_secs)
    }

    /// 轉換為 redis crate 的連線資訊。空密碼代表不執行 AUTH。
    pub fn connection_info(&self) -> RedisResult<ConnectionInfo> {
        if let Some(url) = &self.url {
            return url.as_str().into_connection_info();
        }

        let mut info = (self.host.clone(), self.port).into_connection_info()?;
        info.redis.db = self.db;
        if !self.password.is_empty() {
            info.redis.password = Some(self.password.clone());
        }
        Ok(info)
    }

    /// URL 必須能解析成連線資訊
    ///
    /// `rediss://` 只檢查語法：未編譯 TLS 支援時轉換一定失敗，
    /// 那屬於執行環境問題，留給建立連線時回報。
    fn validate_url(url: &str) -> Result<(), ValidationError> {
        let invalid = |reason: String| {
            ValidationError::InvalidValue(format!("store.url 無法解析: {}", reason))
        };

        if redis::parse_redis_url(url).is_none() {
            return Err(invalid("URL 格式錯誤".to_string()));
        }
        if !url.starts_with("rediss://") {
            url.into_connection_info()
                .map_err(|err| invalid(err.to_string()))?;
        }
        Ok(())
    }
}

impl Validator for StoreConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.url {
            Some(url) => {
                ValidationUtils::not_empty(url, "store.url")?;
                if !URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
                    return Err(ValidationError::InvalidValue(format!(
                        "store.url 必須以 {:?} 其中之一開頭",
                        URL_SCHEMES
                    )));
                }
                Self::validate_url(url)?;
            }
            None => {
                ValidationUtils::not_empty(&self.host, "store.host")?;
                ValidationUtils::in_range(self.port, 1, 65535, "store.port")?;
                ValidationUtils::in_range(self.db, 0, 1023, "store.db")?;
            }
        }
        ValidationUtils::optional_secs(self.connection_timeout_secs, "store.connection_timeout_secs")?;
        ValidationUtils::optional_secs(self.read_timeout_secs, "store.read_timeout_secs")?;
        ValidationUtils::optional_secs(self.write_timeout_secs, "store.write_timeout_secs")?;

        Ok(())
    }
}

/// 日誌配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Validator for LogConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        ValidationUtils::one_of(
            &self.level.to_lowercase(),
            &["trace", "debug", "info", "warn", "error"],
            "log.level",
        )?;
        ValidationUtils::one_of(
            &self.format.to_lowercase(),
            &["pretty", "compact"],
            "log.format",
        )?;

        Ok(())
    }
}
