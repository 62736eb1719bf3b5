use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum GradeStatus {
    Graded, // 已评分
}

impl std::fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeStatus::Graded => write!(f, "graded"),
        }
    }
}

impl std::str::FromStr for GradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "graded" => Ok(GradeStatus::Graded),
            _ => Err(format!("Invalid grade status: {s}")),
        }
    }
}

/// 单个学期内的三次成绩，缺失的成绩为 `None`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoteTriple {
    pub note1: Option<f64>,
    pub note2: Option<f64>,
    pub note3: Option<f64>,
}

impl NoteTriple {
    pub fn new(note1: Option<f64>, note2: Option<f64>, note3: Option<f64>) -> Self {
        Self {
            note1,
            note2,
            note3,
        }
    }

    /// 已填写的成绩
    pub fn present(&self) -> impl Iterator<Item = f64> {
        [self.note1, self.note2, self.note3].into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }

    /// 已填写成绩的算术平均值，全部缺失时为 0
    pub fn average(&self) -> f64 {
        let (sum, count) = self
            .present()
            .fold((0.0, 0usize), |(sum, count), n| (sum + n, count + 1));
        if count == 0 { 0.0 } else { sum / count as f64 }
    }
}

// 学期成绩
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BimesterGrade {
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
    pub status: GradeStatus,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}

// 成绩单中的一行：花名册中的每个学生一行，没有成绩时全部为空
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeSheetRow {
    pub student_id: String,
    pub student_name: String,
    pub grade_id: Option<String>,
    pub note1: Option<f64>,
    pub note2: Option<f64>,
    pub note3: Option<f64>,
    pub average: Option<f64>,
}
