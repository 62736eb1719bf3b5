//! 系统存储操作

use super::SeaOrmStorage;
use crate::errors::{DominiqueError, Result};

impl SeaOrmStorage {
    /// 检查数据库连接
    pub async fn ping_impl(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| DominiqueError::database_connection(format!("数据库不可用: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_ping_in_memory() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(storage.ping_impl().await.is_ok());
    }
}
