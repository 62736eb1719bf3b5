//! 学生花名册存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{Column as AttendanceColumn, Entity as Attendance};
use crate::entity::bimester_grades::{Column as GradeColumn, Entity as BimesterGrades};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{DominiqueError, Result};
use crate::models::students::{
    entities::Student,
    requests::{NewStudent, StudentListQuery},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

/// 唯一索引冲突转换为 Conflict，其余为数据库错误
fn map_student_write_error(e: DbErr, action: &str) -> DominiqueError {
    match e.sql_err() {
        // 并发写入时由唯一索引兜底
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            DominiqueError::conflict(format!("Student already exists: {detail}"))
        }
        _ => DominiqueError::database_operation(format!("{action}学生失败: {e}")),
    }
}

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, student: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(student.name),
            email: Set(student.email),
            enrollment: Set(student.enrollment),
            phone: Set(student.phone),
            grade: Set(student.grade),
            class_id: Set(student.class_id),
            status: Set(Student::STATUS_ACTIVE.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_student_write_error(e, "创建"))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: &str) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过邮箱或学号获取学生，`exclude_id` 用于更新时排除自身
    pub async fn get_student_by_email_or_enrollment_impl(
        &self,
        email: &str,
        enrollment: &str,
        exclude_id: Option<&str>,
    ) -> Result<Option<Student>> {
        let mut select = Students::find().filter(
            Condition::any()
                .add(Column::Email.eq(email))
                .add(Column::Enrollment.eq(enrollment)),
        );

        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let result = select
            .one(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出学生
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(grade) = query.grade {
            select = select.filter(Column::Grade.eq(grade));
        }

        let students = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 整体更新学生信息，学生不存在时返回 None
    pub async fn update_student_impl(
        &self,
        id: &str,
        student: NewStudent,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id.to_string()),
            name: Set(student.name),
            email: Set(student.email),
            enrollment: Set(student.enrollment),
            phone: Set(student.phone),
            grade: Set(student.grade),
            class_id: Set(student.class_id),
            updated_at: Set(chrono::Utc::now().timestamp_millis()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| map_student_write_error(e, "更新"))?;

        Ok(Some(result.into_student()))
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, id: &str) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计学生的成绩与出勤记录数
    pub async fn count_student_records_impl(&self, student_id: &str) -> Result<u64> {
        let grades = BimesterGrades::find()
            .filter(GradeColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("统计学生成绩失败: {e}")))?;

        let attendance = Attendance::find()
            .filter(AttendanceColumn::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("统计学生出勤失败: {e}")))?;

        Ok(grades + attendance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student(name: &str, enrollment: &str, grade: Option<&str>) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            email: format!("{}@dominique.edu.br", name.to_lowercase()),
            enrollment: enrollment.to_string(),
            phone: String::new(),
            grade: grade.map(str::to_string),
            class_id: None,
        }
    }

    #[actix_web::test]
    async fn test_create_and_lookup() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage
            .create_student_impl(new_student("Ana", "2024-001", Some("7ano")))
            .await
            .unwrap();
        assert_eq!(created.status, Student::STATUS_ACTIVE);

        let by_enrollment = storage
            .get_student_by_email_or_enrollment_impl("other@dominique.edu.br", "2024-001", None)
            .await
            .unwrap();
        assert_eq!(by_enrollment.map(|s| s.id), Some(created.id.clone()));

        // 排除自身后不再命中
        let excluding_self = storage
            .get_student_by_email_or_enrollment_impl(
                "ana@dominique.edu.br",
                "2024-001",
                Some(&created.id),
            )
            .await
            .unwrap();
        assert!(excluding_self.is_none());
    }

    #[actix_web::test]
    async fn test_unique_violation_maps_to_conflict() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(new_student("Ana", "2024-001", None))
            .await
            .unwrap();
        let err = storage
            .create_student_impl(new_student("Ana", "2024-002", None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[actix_web::test]
    async fn test_list_by_grade_sorted_by_name() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for (name, enrollment, grade) in [
            ("Carla", "1", "7ano"),
            ("Ana", "2", "7ano"),
            ("Bruno", "3", "8ano"),
        ] {
            storage
                .create_student_impl(new_student(name, enrollment, Some(grade)))
                .await
                .unwrap();
        }

        let seventh = storage
            .list_students_impl(StudentListQuery {
                grade: Some("7ano".to_string()),
            })
            .await
            .unwrap();
        let names: Vec<_> = seventh.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carla"]);
    }

    #[actix_web::test]
    async fn test_update_replaces_fields_and_keeps_unique_keys() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let ana = storage
            .create_student_impl(new_student("Ana", "2024-001", Some("7ano")))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student("Bruno", "2024-002", Some("7ano")))
            .await
            .unwrap();

        let updated = storage
            .update_student_impl(
                &ana.id,
                NewStudent {
                    phone: "11 99999-0000".to_string(),
                    grade: Some("8ano".to_string()),
                    ..new_student("Ana", "2024-001", None)
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.grade.as_deref(), Some("8ano"));
        assert_eq!(updated.phone, "11 99999-0000");
        assert_eq!(updated.created_at, ana.created_at);

        // 占用他人学号由唯一索引拦截
        let err = storage
            .update_student_impl(&ana.id, new_student("Ana", "2024-002", None))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let missing = storage
            .update_student_impl("missing", new_student("Zé", "2024-009", None))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[actix_web::test]
    async fn test_delete_and_count_records() {
        use crate::models::attendance::{entities::AttendanceStatus, requests::NewAttendance};

        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let ana = storage
            .create_student_impl(new_student("Ana", "2024-001", Some("7ano")))
            .await
            .unwrap();
        assert_eq!(storage.count_student_records_impl(&ana.id).await.unwrap(), 0);

        storage
            .upsert_attendance_batch_impl(vec![NewAttendance {
                student_id: ana.id.clone(),
                class_id: "7ano".to_string(),
                date: "2024-03-04".to_string(),
                status: AttendanceStatus::Present,
                observations: None,
            }])
            .await
            .unwrap();
        assert_eq!(storage.count_student_records_impl(&ana.id).await.unwrap(), 1);

        assert!(storage.delete_student_impl(&ana.id).await.unwrap());
        assert!(!storage.delete_student_impl(&ana.id).await.unwrap());
        assert!(storage.get_student_by_id_impl(&ana.id).await.unwrap().is_none());
    }
}
