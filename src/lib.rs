//! 鍵值儲存客戶端
//!
//! ```no_run
//! use store_client::{StoreClient, StoreConfig};
//!
//! # fn main() -> Result<(), store_client::StoreError> {
//! let mut store = StoreClient::connect(&StoreConfig::default())?;
//! store.set("greeting", "hello", 60)?;
//! assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
//! # Ok(())
//! # }
//! ```

// 模組定義
pub mod config;
pub mod logging;
pub mod store;

pub use crate::config::{ConfigLoader, LogConfig, Settings, StoreConfig};
pub use crate::store::{
    shared_handle, KeyType, SharedHandle, StoreClient, StoreError, StoreResult, DEFAULT_TTL_SECS,
};
