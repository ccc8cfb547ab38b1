use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use redis::Connection;
use tracing::debug;

use crate::config::StoreConfig;
use crate::store::client::StoreClient;
use crate::store::error::StoreResult;

/// 延遲初始化的共享客戶端
///
/// 第一次取得時依傳入的配置建立連線，之後的呼叫忽略配置並回傳同一個實例。
/// 初始化失敗不會留下狀態，下一次呼叫會重新嘗試。
pub struct SharedHandle<C = Connection> {
    cell: OnceCell<Mutex<StoreClient<C>>>,
}

impl<C> SharedHandle<C> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// 取得共享客戶端，尚未初始化時以 `connector` 建立
    pub fn get_or_init_with<F>(
        &self,
        config: &StoreConfig,
        connector: F,
    ) -> StoreResult<&Mutex<StoreClient<C>>>
    where
        F: FnOnce(&StoreConfig) -> StoreResult<StoreClient<C>>,
    {
        if let Some(handle) = self.cell.get() {
            debug!("共享客戶端已初始化，忽略傳入的配置");
            return Ok(handle);
        }

        self.cell.get_or_try_init(|| {
            debug!("初始化共享客戶端: {}", config.endpoint());
            connector(config).map(Mutex::new)
        })
    }

    /// 已初始化時回傳共享客戶端
    pub fn get(&self) -> Option<&Mutex<StoreClient<C>>> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl SharedHandle<Connection> {
    pub fn get_or_connect(&self, config: &StoreConfig) -> StoreResult<&Mutex<StoreClient>> {
        self.get_or_init_with(config, StoreClient::connect)
    }
}

impl<C> Default for SharedHandle<C> {
    fn default() -> Self {
        Self::new()
    }
}

// 全局共享客戶端
static SHARED: SharedHandle = SharedHandle::new();

/// 取得行程內共享的儲存客戶端
///
/// 只有第一次呼叫會使用 `config`。透過回傳的 [`Mutex`] 鎖定後下達命令。
pub fn shared_handle(config: &StoreConfig) -> StoreResult<&'static Mutex<StoreClient>> {
    SHARED.get_or_connect(config)
}
