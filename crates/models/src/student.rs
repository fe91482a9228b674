use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const STUDENT_ID_MIN_LEN: usize = 8;
pub const STUDENT_ID_MAX_LEN: usize = 15;
pub const FULL_NAME_MAX_LEN: usize = 60;
pub const EMAIL_MAX_LEN: usize = 100;
pub const MAJOR_MAX_LEN: usize = 30;
pub const LOCATION_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub student_id: String,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub major: Option<String>,
    pub location: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn invalid(msg: &str) -> errors::ModelError {
    errors::ModelError::Validation(msg.to_string())
}

pub fn validate_student_id(s: &str) -> Result<(), errors::ModelError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid("Student ID is required"));
    }
    let len = s.chars().count();
    if !(STUDENT_ID_MIN_LEN..=STUDENT_ID_MAX_LEN).contains(&len) {
        return Err(invalid("Student ID must be 8-15 characters"));
    }
    Ok(())
}

pub fn validate_full_name(s: &str) -> Result<(), errors::ModelError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid("Full name is required"));
    }
    if s.chars().count() > FULL_NAME_MAX_LEN {
        return Err(invalid("Full name cannot exceed 60 characters"));
    }
    Ok(())
}

pub fn validate_email(s: &str) -> Result<(), errors::ModelError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid("University email is required"));
    }
    if s.chars().count() > EMAIL_MAX_LEN || !is_email(s) {
        return Err(invalid("Invalid email format (e.g., name@westernu.edu)"));
    }
    Ok(())
}

pub fn validate_major(s: &str) -> Result<(), errors::ModelError> {
    if s.trim().chars().count() > MAJOR_MAX_LEN {
        return Err(invalid("Major cannot exceed 30 characters"));
    }
    Ok(())
}

pub fn validate_location(s: &str) -> Result<(), errors::ModelError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(invalid("Family location is required"));
    }
    if s.chars().count() > LOCATION_MAX_LEN {
        return Err(invalid("Family location cannot exceed 100 characters"));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and non-empty dot-separated domain labels.
fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else { return false };
    if local.is_empty() || domain.contains('@') || s.chars().any(char::is_whitespace) {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|l| {
        !l.is_empty()
            && !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

pub async fn create(
    db: &DatabaseConnection,
    student_id: &str,
    full_name: &str,
    email: &str,
    major: Option<&str>,
    location: &str,
) -> Result<Model, errors::ModelError> {
    validate_student_id(student_id)?;
    validate_full_name(full_name)?;
    validate_email(email)?;
    if let Some(m) = major { validate_major(m)?; }
    validate_location(location)?;

    let now = Utc::now().into();
    let am = ActiveModel {
        student_id: Set(student_id.trim().to_string()),
        full_name: Set(full_name.trim().to_string()),
        email: Set(email.trim().to_string()),
        major: Set(major.map(|m| m.trim().to_string())),
        location: Set(location.trim().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_id_length_bounds() {
        assert!(validate_student_id("S1234567").is_ok());
        assert!(validate_student_id("S12345678901234").is_ok());
        assert!(validate_student_id("S123456").is_err());
        assert!(validate_student_id("S123456789012345").is_err());
        assert!(validate_student_id("   ").is_err());
    }

    #[test]
    fn full_name_required_and_bounded() {
        assert!(validate_full_name("Jane Doe").is_ok());
        assert!(validate_full_name(&"a".repeat(60)).is_ok());
        assert!(validate_full_name(&"a".repeat(61)).is_err());
        let err = validate_full_name("").unwrap_err();
        assert_eq!(err.to_string(), "validation error: Full name is required");
    }

    #[test]
    fn email_format() {
        for ok in ["jane@uni.edu", "first.last@westernu.edu", "a+b@mail.example-host.org"] {
            assert!(validate_email(ok).is_ok(), "{ok} should be valid");
        }
        for bad in ["", "jane", "jane@", "@uni.edu", "jane@uni", "ja ne@uni.edu", "jane@@uni.edu", "jane@uni..edu", ".jane@uni.edu"] {
            assert!(validate_email(bad).is_err(), "{bad} should be invalid");
        }
    }

    #[test]
    fn major_is_bounded() {
        assert!(validate_major("").is_ok());
        assert!(validate_major("Computer Science").is_ok());
        assert!(validate_major(&"m".repeat(31)).is_err());
    }

    #[test]
    fn location_required() {
        assert!(validate_location("City").is_ok());
        assert!(validate_location(" ").is_err());
        assert!(validate_location(&"l".repeat(101)).is_err());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        // 60 two-byte characters
        assert!(validate_full_name(&"é".repeat(60)).is_ok());
    }
}
