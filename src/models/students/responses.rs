use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Student;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResponse {
    pub student: Student,
}
