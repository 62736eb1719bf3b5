//! 学期成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bimester_grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub student_id: String,
    pub student_name: Option<String>,
    pub subject: String,
    pub class_id: String,
    pub bimester: i32,
    pub note1: Option<f64>,
    pub note2: Option<f64>,
    pub note3: Option<f64>,
    pub average: f64,
    pub status: String,
    pub graded_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_bimester_grade(self) -> crate::models::grades::entities::BimesterGrade {
        use crate::models::grades::entities::{BimesterGrade, GradeStatus};
        use chrono::{DateTime, Utc};

        BimesterGrade {
            id: self.id,
            student_id: self.student_id,
            student_name: self.student_name,
            subject: self.subject,
            class_id: self.class_id,
            bimester: self.bimester,
            note1: self.note1,
            note2: self.note2,
            note3: self.note3,
            average: self.average,
            status: self.status.parse::<GradeStatus>().unwrap_or(GradeStatus::Graded),
            graded_at: DateTime::<Utc>::from_timestamp_millis(self.graded_at).unwrap_or_default(),
        }
    }
}
