use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::SchoolClass;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassResponse {
    pub class: SchoolClass,
}
