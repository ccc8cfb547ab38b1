/// 配置管理模組
///
/// 本模組負責儲存連線與日誌配置的結構、驗證，以及從設定檔加載。
pub mod loader;
pub mod types;
pub mod validation;

// 重新導出常用組件
pub use loader::ConfigLoader;
pub use types::*;
pub use validation::{ValidationError, ValidationUtils, Validator};
