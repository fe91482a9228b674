use async_trait::async_trait;
use models::student;

use super::dto::{NewStudent, StudentChanges};
use crate::errors::ServiceError;

/// Repository abstraction for student persistence.
///
/// Uniqueness of `student_id` and `email` is ultimately enforced by storage;
/// implementations report violations as `ServiceError::Conflict`.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<student::Model>, ServiceError>;
    async fn exists_by_student_id(&self, student_id: &str) -> Result<bool, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;

    /// All records in primary key order.
    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<student::Model>, ServiceError>;
    async fn insert(&self, input: &NewStudent) -> Result<student::Model, ServiceError>;
    /// Apply `changes`; `Ok(None)` when no record has this id.
    async fn update(&self, id: i32, changes: &StudentChanges) -> Result<Option<student::Model>, ServiceError>;
    /// Returns true if a record was removed.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use models::errors::UNIQUE_VIOLATION_MESSAGE;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Store {
        rows: BTreeMap<i32, student::Model>, // key: id
        last_id: i32,
    }

    #[derive(Default)]
    pub struct MockStudentRepository {
        store: Mutex<Store>,
    }

    impl MockStudentRepository {
        fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
            self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    impl Store {
        fn taken(&self, skip_id: Option<i32>, student_id: Option<&str>, email: Option<&str>) -> Option<ServiceError> {
            let others = self.rows.values().filter(|r| Some(r.id) != skip_id);
            for r in others {
                if student_id == Some(r.student_id.as_str()) {
                    return Some(ServiceError::Conflict(UNIQUE_VIOLATION_MESSAGE.into()));
                }
                if email == Some(r.email.as_str()) {
                    return Some(ServiceError::Conflict(UNIQUE_VIOLATION_MESSAGE.into()));
                }
            }
            None
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_by_student_id(&self, student_id: &str) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.lock().rows.values().find(|r| r.student_id == student_id).cloned())
        }

        async fn exists_by_student_id(&self, student_id: &str) -> Result<bool, ServiceError> {
            Ok(self.lock().rows.values().any(|r| r.student_id == student_id))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.lock().rows.values().find(|r| r.email == email).cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            Ok(self.lock().rows.values().any(|r| r.email == email))
        }

        async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
            Ok(self.lock().rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
            Ok(self.lock().rows.get(&id).cloned())
        }

        async fn insert(&self, input: &NewStudent) -> Result<student::Model, ServiceError> {
            let mut store = self.lock();
            if let Some(e) = store.taken(None, Some(&input.student_id), Some(&input.email)) {
                return Err(e);
            }
            store.last_id += 1;
            let now = Utc::now().into();
            let row = student::Model {
                id: store.last_id,
                student_id: input.student_id.clone(),
                full_name: input.full_name.clone(),
                email: input.email.clone(),
                major: input.major.clone(),
                location: input.location.clone(),
                created_at: now,
                updated_at: now,
            };
            store.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, id: i32, changes: &StudentChanges) -> Result<Option<student::Model>, ServiceError> {
            let mut store = self.lock();
            if let Some(e) = store.taken(Some(id), changes.student_id.as_deref(), changes.email.as_deref()) {
                return Err(e);
            }
            let Some(row) = store.rows.get_mut(&id) else { return Ok(None) };
            if let Some(v) = &changes.student_id { row.student_id = v.clone(); }
            if let Some(v) = &changes.full_name { row.full_name = v.clone(); }
            if let Some(v) = &changes.email { row.email = v.clone(); }
            if let Some(v) = &changes.major { row.major = v.clone(); }
            if let Some(v) = &changes.location { row.location = v.clone(); }
            row.updated_at = Utc::now().into();
            Ok(Some(row.clone()))
        }

        async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.lock().rows.remove(&id).is_some())
        }
    }
}
