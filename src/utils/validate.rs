//! 提交数据校验
//!
//! 成绩与出勤在写入数据库前统一经过这里：必填字段、成绩范围、日期格式与状态枚举。

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

use crate::errors::DominiqueError;
use crate::models::attendance::entities::AttendanceStatus;
use crate::models::attendance::requests::{AttendanceSubmission, NewAttendance};
use crate::models::grades::entities::NoteTriple;
use crate::models::grades::requests::{GradeSubmission, NewBimesterGrade};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

pub const MIN_NOTE: f64 = 0.0;
pub const MAX_NOTE: f64 = 10.0;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 只校验基本形状：local@domain.suffix，不含空白
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 单条提交的校验失败原因
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionError {
    MissingField(&'static str),
    InvalidBimester(String),
    NoNotes,
    InvalidDate(String),
    InvalidStatus(String),
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::MissingField(field) => write!(f, "missing required field '{field}'"),
            SubmissionError::InvalidBimester(raw) => {
                write!(f, "bimester must be an integer between 1 and 4, got {raw}")
            }
            SubmissionError::NoNotes => write!(f, "at least one of note1, note2, note3 is required"),
            SubmissionError::InvalidDate(raw) => {
                write!(f, "date must use the YYYY-MM-DD format, got '{raw}'")
            }
            SubmissionError::InvalidStatus(raw) => write!(
                f,
                "status must be one of present, absent, justified, got '{raw}'"
            ),
        }
    }
}

impl From<SubmissionError> for DominiqueError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::InvalidStatus(_) => DominiqueError::invalid_status(err.to_string()),
            SubmissionError::InvalidDate(_) => DominiqueError::date_parse(err.to_string()),
            _ => DominiqueError::validation(err.to_string()),
        }
    }
}

/// 必填字符串：去除首尾空白，空串视为缺失
pub fn required_text(value: Option<&str>, field: &'static str) -> Result<String, SubmissionError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(SubmissionError::MissingField(field)),
    }
}

/// 可选字符串：空串归一为 `None`
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 成绩归一化：数字或数字字符串，且落在 [0,10] 内；其余一律视为未填写
pub fn normalize_note(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };

    (number.is_finite() && (MIN_NOTE..=MAX_NOTE).contains(&number)).then_some(number)
}

/// 学期：整数或整数字符串，范围 1..=4
pub fn parse_bimester(value: Option<&Value>) -> Result<i32, SubmissionError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(SubmissionError::MissingField("bimester")),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(SubmissionError::MissingField("bimester"));
        }
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(b @ 1..=4) => Ok(b as i32),
        _ => Err(SubmissionError::InvalidBimester(
            value.map(Value::to_string).unwrap_or_default(),
        )),
    }
}

/// 日期：`YYYY-MM-DD`，返回规范化后的字符串
pub fn parse_date(raw: &str) -> Result<String, SubmissionError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|d| d.format(DATE_FORMAT).to_string())
        .map_err(|_| SubmissionError::InvalidDate(raw.to_string()))
}

/// 校验单条成绩提交
pub fn validate_grade_submission(
    submission: &GradeSubmission,
) -> Result<NewBimesterGrade, SubmissionError> {
    let student_id = required_text(submission.student_id.as_deref(), "studentId")?;
    let subject = required_text(submission.subject.as_deref(), "subject")?;
    let class_id = required_text(submission.class_id.as_deref(), "classId")?;
    let bimester = parse_bimester(submission.bimester.as_ref())?;

    let notes = NoteTriple::new(
        normalize_note(submission.note1.as_ref()),
        normalize_note(submission.note2.as_ref()),
        normalize_note(submission.note3.as_ref()),
    );
    if notes.is_empty() {
        return Err(SubmissionError::NoNotes);
    }

    Ok(NewBimesterGrade {
        student_id,
        student_name: optional_text(submission.student_name.as_deref()),
        subject,
        class_id,
        bimester,
        notes,
    })
}

/// 校验单条出勤提交
pub fn validate_attendance_submission(
    submission: &AttendanceSubmission,
) -> Result<NewAttendance, SubmissionError> {
    let student_id = required_text(submission.student_id.as_deref(), "studentId")?;
    let class_id = required_text(submission.class_id.as_deref(), "classId")?;
    let date = required_text(submission.date.as_deref(), "date")?;
    let status = required_text(submission.status.as_deref(), "status")?;

    let date = parse_date(&date)?;
    let status = status
        .parse::<AttendanceStatus>()
        .map_err(|_| SubmissionError::InvalidStatus(status))?;

    Ok(NewAttendance {
        student_id,
        class_id,
        date,
        status,
        observations: optional_text(submission.observations.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grade(value: Value) -> GradeSubmission {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("secretaria@dominique.edu.br").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("maria silva@escola.com").is_err());
        assert!(validate_email("a@@b.c").is_err());
    }

    #[test]
    fn test_email_shape_accepts_short_and_accented_addresses() {
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("joão@escola.com.br").is_ok());
    }

    #[test]
    fn test_normalize_note_accepts_numbers_and_numeric_strings() {
        assert_eq!(normalize_note(Some(&json!(8))), Some(8.0));
        assert_eq!(normalize_note(Some(&json!(9.5))), Some(9.5));
        assert_eq!(normalize_note(Some(&json!(" 7.25 "))), Some(7.25));
        assert_eq!(normalize_note(Some(&json!(0))), Some(0.0));
        assert_eq!(normalize_note(Some(&json!(10))), Some(10.0));
    }

    #[test]
    fn test_normalize_note_drops_out_of_range_and_garbage() {
        assert_eq!(normalize_note(None), None);
        assert_eq!(normalize_note(Some(&Value::Null)), None);
        assert_eq!(normalize_note(Some(&json!(""))), None);
        assert_eq!(normalize_note(Some(&json!("abc"))), None);
        assert_eq!(normalize_note(Some(&json!(-0.5))), None);
        assert_eq!(normalize_note(Some(&json!(10.01))), None);
        assert_eq!(normalize_note(Some(&json!("NaN"))), None);
        assert_eq!(normalize_note(Some(&json!(true))), None);
    }

    #[test]
    fn test_parse_bimester() {
        assert_eq!(parse_bimester(Some(&json!(1))), Ok(1));
        assert_eq!(parse_bimester(Some(&json!("4"))), Ok(4));
        assert_eq!(parse_bimester(Some(&json!(2.0))), Ok(2));
        assert_eq!(
            parse_bimester(None),
            Err(SubmissionError::MissingField("bimester"))
        );
        assert!(matches!(
            parse_bimester(Some(&json!(5))),
            Err(SubmissionError::InvalidBimester(_))
        ));
        assert!(matches!(
            parse_bimester(Some(&json!(0))),
            Err(SubmissionError::InvalidBimester(_))
        ));
        assert!(matches!(
            parse_bimester(Some(&json!(1.5))),
            Err(SubmissionError::InvalidBimester(_))
        ));
    }

    #[test]
    fn test_grade_submission_requires_fields_in_order() {
        let err = validate_grade_submission(&grade(json!({
            "subject": "ciencias", "classId": "7ano", "bimester": 1, "note1": 8
        })))
        .unwrap_err();
        assert_eq!(err, SubmissionError::MissingField("studentId"));

        let err = validate_grade_submission(&grade(json!({
            "studentId": "s1", "subject": "  ", "classId": "7ano", "bimester": 1, "note1": 8
        })))
        .unwrap_err();
        assert_eq!(err, SubmissionError::MissingField("subject"));

        let err = validate_grade_submission(&grade(json!({
            "studentId": "s1", "subject": "ciencias", "classId": "7ano", "note1": 8
        })))
        .unwrap_err();
        assert_eq!(err, SubmissionError::MissingField("bimester"));
    }

    #[test]
    fn test_grade_submission_requires_one_note_after_normalisation() {
        let err = validate_grade_submission(&grade(json!({
            "studentId": "s1", "subject": "ciencias", "classId": "7ano", "bimester": 1,
            "note1": 11, "note2": "", "note3": null
        })))
        .unwrap_err();
        assert_eq!(err, SubmissionError::NoNotes);
    }

    #[test]
    fn test_grade_submission_normalises_notes() {
        let valid = validate_grade_submission(&grade(json!({
            "studentId": "s1", "studentName": " Ana ", "subject": "ciencias",
            "classId": "7ano", "bimester": "1", "note1": "8", "note2": 9, "note3": 42
        })))
        .unwrap();
        assert_eq!(valid.notes, NoteTriple::new(Some(8.0), Some(9.0), None));
        assert_eq!(valid.notes.average(), 8.5);
        assert_eq!(valid.student_name.as_deref(), Some("Ana"));
        assert_eq!(valid.bimester, 1);
    }

    #[test]
    fn test_attendance_submission() {
        let ok = validate_attendance_submission(&AttendanceSubmission {
            student_id: Some("s1".into()),
            class_id: Some("7ano".into()),
            date: Some("2024-01-15".into()),
            status: Some("justified".into()),
            observations: Some("   ".into()),
        })
        .unwrap();
        assert_eq!(ok.status, AttendanceStatus::Justified);
        assert_eq!(ok.observations, None);

        let missing = validate_attendance_submission(&AttendanceSubmission {
            student_id: Some("s1".into()),
            class_id: Some("7ano".into()),
            date: Some("2024-01-15".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(missing, SubmissionError::MissingField("status"));

        let bad_status = validate_attendance_submission(&AttendanceSubmission {
            student_id: Some("s1".into()),
            class_id: Some("7ano".into()),
            date: Some("2024-01-15".into()),
            status: Some("late".into()),
            observations: None,
        })
        .unwrap_err();
        assert!(matches!(bad_status, SubmissionError::InvalidStatus(_)));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-15"), Ok("2024-01-15".to_string()));
        assert!(parse_date("15/01/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_submission_error_maps_to_http_status() {
        use actix_web::http::StatusCode;
        let err: DominiqueError = SubmissionError::NoNotes.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err: DominiqueError = SubmissionError::InvalidStatus("x".into()).into();
        assert_eq!(err.code(), "E005");
    }
}
