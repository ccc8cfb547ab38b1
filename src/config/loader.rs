use config::{Config, Environment as ConfigEnvironment, File};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::types::Settings;
use crate::config::validation::Validator;
use crate::store::error::StoreResult;

/// 配置加載器，從設定檔與（可選的）環境變數載入 [`Settings`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 載入指定路徑的設定檔
    ///
    /// 檔案格式依副檔名判斷 (toml / json / yaml)。`env_prefix` 為 `Some` 時，
    /// `PREFIX__STORE__HOST` 之類的環境變數會覆蓋檔案中的值。
    /// 讀取或反序列化失敗回傳 [`StoreError::Config`](crate::store::StoreError::Config)。
    pub fn load(path: impl AsRef<Path>, env_prefix: Option<&str>) -> StoreResult<Settings> {
        let path = path.as_ref();
        debug!("從設定檔加載配置: {}", path.display());

        let mut config_builder = Config::builder().add_source(File::from(path));

        // 從環境變數加載配置（優先級高於文件配置）
        if let Some(prefix) = env_prefix {
            config_builder = config_builder.add_source(
                ConfigEnvironment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let settings: Settings = config_builder.build()?.try_deserialize()?;

        if let Err(err) = settings.validate() {
            warn!("配置驗證失敗: {}", err);
        } else {
            debug!("配置驗證通過");
        }

        Ok(settings)
    }
}
