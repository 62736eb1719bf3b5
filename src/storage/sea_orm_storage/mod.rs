//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classes;
mod contact_messages;
mod grades;
mod students;
mod system;

use crate::config::AppConfig;
use crate::errors::{DominiqueError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::with_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已有连接创建存储并运行迁移
    pub async fn with_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite（单连接，保证所有查询看到同一个库）
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DominiqueError::database_config(format!("SQLite URL 解析失败: {e}")))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| DominiqueError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::with_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DominiqueError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DominiqueError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DominiqueError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DominiqueError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    attendance::{
        entities::AttendanceRecord,
        requests::{AttendanceListQuery, NewAttendance},
    },
    classes::{
        entities::{ClassSummary, SchoolClass},
        requests::NewClass,
    },
    contact::{
        entities::{ContactMessage, ContactStatus},
        requests::NewContactMessage,
    },
    grades::{
        entities::{BimesterGrade, GradeSheetRow},
        requests::{GradeListQuery, NewBimesterGrade},
    },
    students::{
        entities::Student,
        requests::{NewStudent, StudentListQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 成绩模块
    async fn upsert_bimester_grades(
        &self,
        grades: Vec<NewBimesterGrade>,
    ) -> Result<Vec<BimesterGrade>> {
        self.upsert_bimester_grades_impl(grades).await
    }

    async fn list_bimester_grades(&self, query: GradeListQuery) -> Result<Vec<BimesterGrade>> {
        self.list_bimester_grades_impl(query).await
    }

    async fn grade_sheet(
        &self,
        class_id: &str,
        bimester: i32,
        subject: &str,
    ) -> Result<Vec<GradeSheetRow>> {
        self.grade_sheet_impl(class_id, bimester, subject).await
    }

    // 出勤模块
    async fn upsert_attendance_batch(
        &self,
        records: Vec<NewAttendance>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.upsert_attendance_batch_impl(records).await
    }

    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(query).await
    }

    async fn delete_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: &str,
    ) -> Result<u64> {
        self.delete_attendance_by_date_and_class_impl(date, class_id)
            .await
    }

    // 联系留言模块
    async fn create_contact_message(&self, message: NewContactMessage) -> Result<ContactMessage> {
        self.create_contact_message_impl(message).await
    }

    async fn get_contact_message_by_id(&self, id: &str) -> Result<Option<ContactMessage>> {
        self.get_contact_message_by_id_impl(id).await
    }

    async fn list_contact_messages(&self, limit: u64) -> Result<Vec<ContactMessage>> {
        self.list_contact_messages_impl(limit).await
    }

    async fn update_contact_message_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactMessage>> {
        self.update_contact_message_status_impl(id, status).await
    }

    async fn delete_contact_message(&self, id: &str) -> Result<bool> {
        self.delete_contact_message_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: NewStudent) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email_or_enrollment(
        &self,
        email: &str,
        enrollment: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Student>> {
        self.get_student_by_email_or_enrollment_impl(email, enrollment, exclude_id)
            .await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        self.list_students_impl(query).await
    }

    async fn update_student(&self, id: &str, student: NewStudent) -> Result<Option<Student>> {
        self.update_student_impl(id, student).await
    }

    async fn delete_student(&self, id: &str) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn count_student_records(&self, student_id: &str) -> Result<u64> {
        self.count_student_records_impl(student_id).await
    }

    // 班级模块
    async fn create_class(&self, class: NewClass) -> Result<SchoolClass> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, id: &str) -> Result<Option<SchoolClass>> {
        self.get_class_by_id_impl(id).await
    }

    async fn list_classes(&self) -> Result<Vec<ClassSummary>> {
        self.list_classes_impl().await
    }

    async fn update_class(&self, id: &str, class: NewClass) -> Result<Option<SchoolClass>> {
        self.update_class_impl(id, class).await
    }

    async fn delete_class(&self, id: &str) -> Result<bool> {
        self.delete_class_impl(id).await
    }

    async fn count_students_in_class(&self, class_id: &str) -> Result<u64> {
        self.count_students_in_class_impl(class_id).await
    }

    // 系统模块
    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("dominique.db").unwrap(),
            "sqlite://dominique.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/dominique").unwrap(),
            "postgres://u:p@localhost/dominique"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
