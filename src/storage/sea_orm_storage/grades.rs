//! 学期成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::bimester_grades::{ActiveModel, Column, Entity as BimesterGrades, Model};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{DominiqueError, Result};
use crate::models::grades::{
    entities::{BimesterGrade, GradeSheetRow, GradeStatus},
    requests::{GradeListQuery, NewBimesterGrade},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量写入成绩
    ///
    /// 以 (student_id, subject, class_id, bimester) 为自然键做 upsert：
    /// 再次提交时覆盖成绩、平均分与评分时间，保留原 ID。
    pub async fn upsert_bimester_grades_impl(
        &self,
        grades: Vec<NewBimesterGrade>,
    ) -> Result<Vec<BimesterGrade>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DominiqueError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(grades.len());
        for grade in grades {
            saved.push(Self::upsert_one_grade(&txn, grade).await?);
        }

        txn.commit()
            .await
            .map_err(|e| DominiqueError::database_operation(format!("提交成绩事务失败: {e}")))?;

        Ok(saved.into_iter().map(|m| m.into_bimester_grade()).collect())
    }

    async fn upsert_one_grade<C: ConnectionTrait>(
        conn: &C,
        grade: NewBimesterGrade,
    ) -> Result<Model> {
        let now = chrono::Utc::now().timestamp_millis();
        let average = grade.notes.average();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            student_id: Set(grade.student_id.clone()),
            student_name: Set(grade.student_name),
            subject: Set(grade.subject.clone()),
            class_id: Set(grade.class_id.clone()),
            bimester: Set(grade.bimester),
            note1: Set(grade.notes.note1),
            note2: Set(grade.notes.note2),
            note3: Set(grade.notes.note3),
            average: Set(average),
            status: Set(GradeStatus::Graded.to_string()),
            graded_at: Set(now),
        };

        BimesterGrades::insert(model)
            .on_conflict(
                OnConflict::columns([
                    Column::StudentId,
                    Column::Subject,
                    Column::ClassId,
                    Column::Bimester,
                ])
                .update_columns([
                    Column::StudentName,
                    Column::Note1,
                    Column::Note2,
                    Column::Note3,
                    Column::Average,
                    Column::Status,
                    Column::GradedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("保存成绩失败: {e}")))?;

        BimesterGrades::find()
            .filter(Column::StudentId.eq(grade.student_id.as_str()))
            .filter(Column::Subject.eq(grade.subject.as_str()))
            .filter(Column::ClassId.eq(grade.class_id.as_str()))
            .filter(Column::Bimester.eq(grade.bimester))
            .one(conn)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询成绩失败: {e}")))?
            .ok_or_else(|| {
                DominiqueError::database_operation(format!(
                    "成绩写入后未找到记录: {} / {} / {} / {}",
                    grade.student_id, grade.subject, grade.class_id, grade.bimester
                ))
            })
    }

    /// 按条件列出成绩
    pub async fn list_bimester_grades_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<Vec<BimesterGrade>> {
        let mut select = BimesterGrades::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject) = query.subject {
            select = select.filter(Column::Subject.eq(subject));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(bimester) = query.bimester {
            select = select.filter(Column::Bimester.eq(bimester));
        }

        let grades = select
            .order_by_desc(Column::GradedAt)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_bimester_grade()).collect())
    }

    /// 班级成绩单
    pub async fn grade_sheet_impl(
        &self,
        class_id: &str,
        bimester: i32,
        subject: &str,
    ) -> Result<Vec<GradeSheetRow>> {
        let roster = Students::find()
            .filter(StudentColumn::Grade.eq(class_id))
            .order_by_asc(StudentColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询花名册失败: {e}")))?;

        let mut grades: HashMap<String, Model> = BimesterGrades::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Subject.eq(subject))
            .filter(Column::Bimester.eq(bimester))
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询成绩失败: {e}")))?
            .into_iter()
            .map(|m| (m.student_id.clone(), m))
            .collect();

        let rows = roster
            .into_iter()
            .map(|student| {
                let grade = grades.remove(&student.id);
                GradeSheetRow {
                    grade_id: grade.as_ref().map(|g| g.id.clone()),
                    note1: grade.as_ref().and_then(|g| g.note1),
                    note2: grade.as_ref().and_then(|g| g.note2),
                    note3: grade.as_ref().and_then(|g| g.note3),
                    average: grade.as_ref().map(|g| g.average),
                    student_id: student.id,
                    student_name: student.name,
                }
            })
            .collect();

        Ok(rows)
    }
}
