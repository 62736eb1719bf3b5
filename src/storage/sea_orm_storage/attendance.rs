//! 出勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance, Model};
use crate::errors::{DominiqueError, Result};
use crate::models::attendance::{
    entities::AttendanceRecord,
    requests::{AttendanceListQuery, NewAttendance},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量写入出勤
    ///
    /// 每个学生每天只有一条记录：已存在时只更新状态、备注与更新时间，班级保持首次记录时的值。
    pub async fn upsert_attendance_batch_impl(
        &self,
        records: Vec<NewAttendance>,
    ) -> Result<Vec<AttendanceRecord>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DominiqueError::database_operation(format!("开启事务失败: {e}")))?;

        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            saved.push(Self::upsert_one_attendance(&txn, record).await?);
        }

        txn.commit()
            .await
            .map_err(|e| DominiqueError::database_operation(format!("提交出勤事务失败: {e}")))?;

        Ok(saved.into_iter().map(|m| m.into_attendance()).collect())
    }

    async fn upsert_one_attendance<C: ConnectionTrait>(
        conn: &C,
        record: NewAttendance,
    ) -> Result<Model> {
        let now = chrono::Utc::now().timestamp_millis();

        let model = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            student_id: Set(record.student_id.clone()),
            class_id: Set(record.class_id),
            date: Set(record.date.clone()),
            status: Set(record.status.to_string()),
            observations: Set(record.observations),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Attendance::insert(model)
            .on_conflict(
                OnConflict::columns([Column::StudentId, Column::Date])
                    .update_columns([
                        Column::Status,
                        Column::Observations,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("保存出勤失败: {e}")))?;

        Attendance::find()
            .filter(Column::StudentId.eq(record.student_id.as_str()))
            .filter(Column::Date.eq(record.date.as_str()))
            .one(conn)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询出勤失败: {e}")))?
            .ok_or_else(|| {
                DominiqueError::database_operation(format!(
                    "出勤写入后未找到记录: {} / {}",
                    record.student_id, record.date
                ))
            })
    }

    /// 按条件列出出勤
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let records = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("查询出勤列表失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 删除某天某班的出勤
    pub async fn delete_attendance_by_date_and_class_impl(
        &self,
        date: &str,
        class_id: &str,
    ) -> Result<u64> {
        let result = Attendance::delete_many()
            .filter(Column::Date.eq(date))
            .filter(Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| DominiqueError::database_operation(format!("清空出勤失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
