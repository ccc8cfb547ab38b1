//! 日誌系統初始化

use tracing::subscriber::SetGlobalDefaultError;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::LogConfig;

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    }
}

/// 安裝全域日誌訂閱者
///
/// `RUST_LOG` 存在時優先於配置中的級別。已安裝過訂閱者時回傳錯誤，
/// 呼叫端可以忽略。
pub fn init_logging(log_config: &LogConfig) -> Result<(), SetGlobalDefaultError> {
    let level = parse_level(&log_config.level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let builder = FmtSubscriber::builder().with_env_filter(filter);
    if log_config.format.eq_ignore_ascii_case("compact") {
        tracing::subscriber::set_global_default(builder.compact().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    info!("日誌系統初始化完成");
    Ok(())
}
