use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 成绩管理方法
    // 批量写入成绩（同一自然键再次提交时覆盖），整批在一个事务内完成
    async fn upsert_bimester_grades(
        &self,
        grades: Vec<NewBimesterGrade>,
    ) -> Result<Vec<BimesterGrade>>;
    // 按条件查询成绩，按评分时间倒序
    async fn list_bimester_grades(&self, query: GradeListQuery) -> Result<Vec<BimesterGrade>>;
    // 班级成绩单：花名册左连接成绩
    async fn grade_sheet(
        &self,
        class_id: &str,
        bimester: i32,
        subject: &str,
    ) -> Result<Vec<GradeSheetRow>>;

    /// 出勤管理方法
    // 批量写入出勤（按学生与日期 upsert），整批在一个事务内完成
    async fn upsert_attendance_batch(
        &self,
        records: Vec<NewAttendance>,
    ) -> Result<Vec<AttendanceRecord>>;
    // 按条件查询出勤，日期倒序、学生 ID 正序
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>>;
    // 删除某天某班的全部出勤，返回删除条数
    async fn delete_attendance_by_date_and_class(&self, date: &str, class_id: &str)
    -> Result<u64>;

    /// 联系留言方法
    // 创建留言（状态为 new）
    async fn create_contact_message(&self, message: NewContactMessage) -> Result<ContactMessage>;
    // 通过ID获取留言
    async fn get_contact_message_by_id(&self, id: &str) -> Result<Option<ContactMessage>>;
    // 列出最新的留言
    async fn list_contact_messages(&self, limit: u64) -> Result<Vec<ContactMessage>>;
    // 更新留言状态，留言不存在时返回 None
    async fn update_contact_message_status(
        &self,
        id: &str,
        status: ContactStatus,
    ) -> Result<Option<ContactMessage>>;
    // 删除留言
    async fn delete_contact_message(&self, id: &str) -> Result<bool>;

    /// 学生花名册方法
    // 创建学生
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: &str) -> Result<Option<Student>>;
    // 通过邮箱或学号查找学生，可排除指定学生
    async fn get_student_by_email_or_enrollment(
        &self,
        email: &str,
        enrollment: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Student>>;
    // 列出学生，按姓名排序
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>>;
    // 更新学生，学生不存在时返回 None
    async fn update_student(&self, id: &str, student: NewStudent) -> Result<Option<Student>>;
    // 删除学生
    async fn delete_student(&self, id: &str) -> Result<bool>;
    // 学生的成绩与出勤记录总数
    async fn count_student_records(&self, student_id: &str) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: NewClass) -> Result<SchoolClass>;
    // 通过ID获取班级
    async fn get_class_by_id(&self, id: &str) -> Result<Option<SchoolClass>>;
    // 列出班级及人数
    async fn list_classes(&self) -> Result<Vec<ClassSummary>>;
    // 更新班级，班级不存在时返回 None
    async fn update_class(&self, id: &str, class: NewClass) -> Result<Option<SchoolClass>>;
    // 删除班级
    async fn delete_class(&self, id: &str) -> Result<bool>;
    // 班级内学生人数
    async fn count_students_in_class(&self, class_id: &str) -> Result<u64>;

    /// 系统方法
    // 检查数据库连接
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}

/// 测试用存储：迁移完成的内存 SQLite
#[cfg(test)]
pub async fn create_test_storage() -> Arc<dyn Storage> {
    let storage = sea_orm_storage::SeaOrmStorage::new_in_memory()
        .await
        .expect("in-memory storage should initialize");
    Arc::new(storage)
}
