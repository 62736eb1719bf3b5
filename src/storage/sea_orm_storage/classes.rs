//! 班级存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{DominiqueError, Result};
use crate::models::classes::{
    entities::{ClassSummary, SchoolClass},
    requests::NewClass,
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, class: NewClass) -> Result<SchoolClass> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(class.name),
            description: Set(class.description),
            subject: Set(class.subject),
            teacher: Set(class.teacher),
            schedule: Set(class.schedule),
            capacity: Set(class.capacity),
            status: Set(class.status),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, id: &str) -> Result<Option<SchoolClass>> {
        let result = Classes::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 列出班级（新建在前）及各班学生人数
    pub async fn list_classes_impl(&self) -> Result<Vec<ClassSummary>> {
        let classes = Classes::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询班级列表失败: {e}")))?;

        let counts: HashMap<String, i64> = Students::find()
            .select_only()
            .column(StudentColumn::ClassId)
            .column_as(Expr::col(StudentColumn::Id).count(), "student_count")
            .filter(StudentColumn::ClassId.is_not_null())
            .group_by(StudentColumn::ClassId)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("统计班级人数失败: {e}")))?
            .into_iter()
            .collect();

        Ok(classes
            .into_iter()
            .map(|m| {
                let student_count = counts.get(&m.id).copied().unwrap_or(0) as u64;
                ClassSummary {
                    class: m.into_class(),
                    student_count,
                }
            })
            .collect())
    }

    /// 整体更新班级，班级不存在时返回 None
    pub async fn update_class_impl(
        &self,
        id: &str,
        class: NewClass,
    ) -> Result<Option<SchoolClass>> {
        if self.get_class_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id.to_string()),
            name: Set(class.name),
            description: Set(class.description),
            subject: Set(class.subject),
            teacher: Set(class.teacher),
            schedule: Set(class.schedule),
            capacity: Set(class.capacity),
            status: Set(class.status),
            updated_at: Set(chrono::Utc::now().timestamp_millis()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("更新班级失败: {e}")))?;

        Ok(Some(result.into_class()))
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, id: &str) -> Result<bool> {
        let result = Classes::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计班级内的学生人数
    pub async fn count_students_in_class_impl(&self, class_id: &str) -> Result<u64> {
        Students::find()
            .filter(StudentColumn::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("统计班级人数失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::NewStudent;

    fn new_class(name: &str) -> NewClass {
        NewClass {
            name: name.to_string(),
            description: None,
            subject: "Matemática".to_string(),
            teacher: "Prof. Helena".to_string(),
            schedule: Some("Seg/Qua 08:00".to_string()),
            capacity: SchoolClass::DEFAULT_CAPACITY,
            status: SchoolClass::STATUS_ACTIVE.to_string(),
        }
    }

    async fn enroll(storage: &SeaOrmStorage, name: &str, class_id: &str) {
        storage
            .create_student_impl(NewStudent {
                name: name.to_string(),
                email: format!("{}@dominique.edu.br", name.to_lowercase()),
                enrollment: format!("mat-{}", name.to_lowercase()),
                phone: String::new(),
                grade: None,
                class_id: Some(class_id.to_string()),
            })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_list_reports_student_counts() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let turma_a = storage.create_class_impl(new_class("Turma A")).await.unwrap();
        let turma_b = storage.create_class_impl(new_class("Turma B")).await.unwrap();
        enroll(&storage, "Ana", &turma_a.id).await;
        enroll(&storage, "Bruno", &turma_a.id).await;

        let listed = storage.list_classes_impl().await.unwrap();
        assert_eq!(listed.len(), 2);
        let count_of = |id: &str| {
            listed
                .iter()
                .find(|c| c.class.id == id)
                .map(|c| c.student_count)
        };
        assert_eq!(count_of(&turma_a.id), Some(2));
        assert_eq!(count_of(&turma_b.id), Some(0));
        assert_eq!(
            storage.count_students_in_class_impl(&turma_a.id).await.unwrap(),
            2
        );
    }

    #[actix_web::test]
    async fn test_update_and_delete() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage.create_class_impl(new_class("Turma A")).await.unwrap();

        let updated = storage
            .update_class_impl(
                &created.id,
                NewClass {
                    capacity: 25,
                    status: "inactive".to_string(),
                    ..new_class("Turma A (tarde)")
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Turma A (tarde)");
        assert_eq!(updated.capacity, 25);
        assert_eq!(updated.created_at, created.created_at);

        assert!(
            storage
                .update_class_impl("missing", new_class("X"))
                .await
                .unwrap()
                .is_none()
        );

        assert!(storage.delete_class_impl(&created.id).await.unwrap());
        assert!(storage.get_class_by_id_impl(&created.id).await.unwrap().is_none());
        assert!(!storage.delete_class_impl(&created.id).await.unwrap());
    }
}
