use serde::Serialize;

/// 业务错误码
///
/// 0 表示成功；1xxx 为通用错误，2xxx 成绩，3xxx 出勤，4xxx 联系留言，5xxx 学生，6xxx 班级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,
    DatabaseUnavailable = 1503,

    // 成绩
    GradeValidationFailed = 2001,
    GradeSaveFailed = 2002,

    // 出勤
    AttendanceValidationFailed = 3001,
    AttendanceSaveFailed = 3002,

    // 联系留言
    ContactValidationFailed = 4001,
    ContactStatusInvalid = 4002,
    ContactNotFound = 4004,
    ContactTransitionDenied = 4009,

    // 学生
    StudentValidationFailed = 5001,
    StudentNotFound = 5004,
    StudentAlreadyExists = 5009,
    StudentHasRecords = 5010,

    // 班级
    ClassValidationFailed = 6001,
    ClassNotFound = 6004,
    ClassNotEmpty = 6009,
}
