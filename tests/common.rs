//! 集中化的整合測試配置
//!
//! 測試需要可連線的伺服器，找不到時跳過。

use store_client::{StoreClient, StoreConfig};

/// 測試用配置
///
/// 優先級：
/// 1. REDIS_TEST_HOST / REDIS_TEST_PORT 環境變數
/// 2. 檢測 Docker 環境使用 redis:6379
/// 3. 預設 127.0.0.1:6379
pub fn test_config() -> StoreConfig {
    let host = std::env::var("REDIS_TEST_HOST").unwrap_or_else(|_| {
        if std::path::Path::new("/.dockerenv").exists() {
            "redis".to_string()
        } else {
            "127.0.0.1".to_string()
        }
    });
    let port = std::env::var("REDIS_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(6379);

    let mut config = StoreConfig::new(host, port);
    config.db = 15;
    config.connection_timeout_secs = Some(2);
    config.read_timeout_secs = Some(5);
    config.write_timeout_secs = Some(5);
    config
}

/// 嘗試連線，失敗時印出原因並回傳 None 讓測試跳過
pub fn connect_or_skip(test_name: &str) -> Option<StoreClient> {
    match StoreClient::connect(&test_config()) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("跳過 '{}'：儲存服務不可用 ({})", test_name, e);
            None
        }
    }
}

/// 產生每個測試專用的鍵名，避免互相干擾
pub fn test_key(test_name: &str, suffix: &str) -> String {
    format!("store_client_test:{}:{}", test_name, suffix)
}
