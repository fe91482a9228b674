use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use models::student;
use crate::validation::ValidationErrors;

/// Request body for create and update.
///
/// Every field is optional on the wire so that missing values surface as
/// field-level validation errors. Create requires all mandatory fields; update
/// applies only the fields that are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Validated input for creating a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub major: Option<String>,
    pub location: String,
}

/// Validated field changes for an update; `None` leaves a field untouched.
///
/// `major: Some(None)` clears the major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub student_id: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub major: Option<Option<String>>,
    pub location: Option<String>,
}

impl StudentChanges {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none()
            && self.full_name.is_none()
            && self.email.is_none()
            && self.major.is_none()
            && self.location.is_none()
    }
}

fn required(errs: &mut ValidationErrors, field: &str, value: Option<&str>, message: &str) -> Option<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => {
            errs.push(field, message);
            None
        }
    }
}

fn normalize_major(m: &str) -> Option<String> {
    let m = m.trim();
    (!m.is_empty()).then(|| m.to_string())
}

impl StudentRequest {
    /// Validate for creation; every required field must be present and valid.
    pub fn validate_create(&self) -> Result<NewStudent, ValidationErrors> {
        let mut errs = ValidationErrors::new();

        let student_id = required(&mut errs, "studentId", self.student_id.as_deref(), "Student ID is required");
        if let Some(v) = &student_id { errs.check("studentId", student::validate_student_id(v)); }

        let full_name = required(&mut errs, "fullName", self.full_name.as_deref(), "Full name is required");
        if let Some(v) = &full_name { errs.check("fullName", student::validate_full_name(v)); }

        let email = required(&mut errs, "email", self.email.as_deref(), "University email is required");
        if let Some(v) = &email { errs.check("email", student::validate_email(v)); }

        if let Some(v) = &self.major { errs.check("major", student::validate_major(v)); }

        let location = required(&mut errs, "location", self.location.as_deref(), "Family location is required");
        if let Some(v) = &location { errs.check("location", student::validate_location(v)); }

        let (Some(student_id), Some(full_name), Some(email), Some(location)) = (student_id, full_name, email, location) else {
            return Err(errs);
        };
        errs.into_result()?;
        Ok(NewStudent {
            student_id,
            full_name,
            email,
            major: self.major.as_deref().and_then(normalize_major),
            location,
        })
    }

    /// Validate for update; only supplied fields are checked and applied.
    pub fn validate_update(&self) -> Result<StudentChanges, ValidationErrors> {
        let mut errs = ValidationErrors::new();
        if let Some(v) = &self.student_id { errs.check("studentId", student::validate_student_id(v)); }
        if let Some(v) = &self.full_name { errs.check("fullName", student::validate_full_name(v)); }
        if let Some(v) = &self.email { errs.check("email", student::validate_email(v)); }
        if let Some(v) = &self.major { errs.check("major", student::validate_major(v)); }
        if let Some(v) = &self.location { errs.check("location", student::validate_location(v)); }
        errs.into_result()?;

        let trimmed = |v: &Option<String>| v.as_deref().map(|s| s.trim().to_string());
        Ok(StudentChanges {
            student_id: trimmed(&self.student_id),
            full_name: trimmed(&self.full_name),
            email: trimmed(&self.email),
            major: self.major.as_deref().map(normalize_major),
            location: trimmed(&self.location),
        })
    }
}

/// Read-only projection of a persisted student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i32,
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub major: Option<String>,
    pub location: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            full_name: m.full_name,
            email: m.email,
            major: m.major,
            location: m.location,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> StudentRequest {
        StudentRequest {
            student_id: Some("S12345678".into()),
            full_name: Some("Jane Doe".into()),
            email: Some("jane@uni.edu".into()),
            major: None,
            location: Some("City".into()),
        }
    }

    #[test]
    fn deserializes_camel_case_and_ignores_id() {
        let req: StudentRequest = serde_json::from_value(serde_json::json!({
            "id": 99,
            "studentId": "S12345678",
            "fullName": "Jane Doe",
            "email": "jane@uni.edu",
            "location": "City"
        }))
        .unwrap();
        assert_eq!(req.student_id.as_deref(), Some("S12345678"));
        assert_eq!(req.full_name.as_deref(), Some("Jane Doe"));
        assert!(req.major.is_none());
    }

    #[test]
    fn create_accepts_valid_request() {
        let new = jane().validate_create().unwrap();
        assert_eq!(new.student_id, "S12345678");
        assert_eq!(new.major, None);
    }

    #[test]
    fn create_reports_every_missing_field() {
        let errs = StudentRequest::default().validate_create().unwrap_err();
        let fields: Vec<&str> = errs.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["studentId", "fullName", "email", "location"]);
        assert_eq!(errs.errors()[2].message, "University email is required");
    }

    #[test]
    fn create_reports_constraint_messages() {
        let req = StudentRequest {
            student_id: Some("S1".into()),
            email: Some("not-an-email".into()),
            major: Some("m".repeat(31)),
            ..jane()
        };
        let errs = req.validate_create().unwrap_err();
        let msgs: Vec<&str> = errs.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            msgs,
            [
                "Student ID must be 8-15 characters",
                "Invalid email format (e.g., name@westernu.edu)",
                "Major cannot exceed 30 characters",
            ]
        );
    }

    #[test]
    fn blank_major_becomes_none() {
        let req = StudentRequest { major: Some("  ".into()), ..jane() };
        assert_eq!(req.validate_create().unwrap().major, None);
    }

    #[test]
    fn update_only_carries_supplied_fields() {
        let req = StudentRequest { full_name: Some(" New Name ".into()), ..StudentRequest::default() };
        let changes = req.validate_update().unwrap();
        assert_eq!(changes.full_name.as_deref(), Some("New Name"));
        assert!(changes.student_id.is_none());
        assert!(changes.major.is_none());
        assert!(!changes.is_empty());
        assert!(StudentRequest::default().validate_update().unwrap().is_empty());
    }

    #[test]
    fn update_empty_major_clears_it() {
        let req = StudentRequest { major: Some(String::new()), ..StudentRequest::default() };
        assert_eq!(req.validate_update().unwrap().major, Some(None));
    }

    #[test]
    fn update_rejects_blank_required_field() {
        let req = StudentRequest { location: Some(" ".into()), ..StudentRequest::default() };
        let errs = req.validate_update().unwrap_err();
        assert_eq!(errs.errors()[0].field, "location");
        assert_eq!(errs.errors()[0].message, "Family location is required");
    }
}
