use crate::config::AppConfig;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 检查数据库是否可用，失败只记录日志（健康检查会继续报告）
async fn check_database(storage: &Arc<dyn Storage>) {
    match storage.ping().await {
        Ok(()) => debug!("Database ping succeeded"),
        Err(e) => warn!("Database ping failed after startup: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储连接与数据库迁移
pub async fn prepare_server_startup() -> StartupContext {
    let config = AppConfig::get();
    info!(
        "Preparing {} ({} environment)",
        config.app.system_name, config.app.environment
    );

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    check_database(&storage).await;

    StartupContext { storage }
}
