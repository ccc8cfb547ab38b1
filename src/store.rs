//! 儲存客戶端模組
//!
//! 以單一阻塞連線封裝鍵值儲存的常用命令：字串、列表、雜湊、集合、
//! 有序集合、過期與鍵管理，並提供行程內共享的延遲初始化客戶端。

pub mod client;
pub mod error;
pub mod key_type;
pub mod shared;

#[cfg(test)]
pub mod test_connection;

pub use client::*;
pub use error::*;
pub use key_type::KeyType;
pub use shared::*;
