use std::sync::Arc;
use tracing::{info, warn, instrument};

use crate::errors::ServiceError;
use super::dto::{NewStudent, StudentChanges, StudentResponse};
use super::repository::StudentRepository;

/// Application service encapsulating student business rules.
/// Enforces `studentId`/`email` uniqueness before touching storage and maps
/// persisted records to response DTOs.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a student after checking both unique keys are free.
    ///
    /// # Examples
    /// ```
    /// use service::student::{dto::StudentRequest, repository::mock::MockStudentRepository, service::StudentService};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let req = StudentRequest {
    ///     student_id: Some("S12345678".into()),
    ///     full_name: Some("Jane Doe".into()),
    ///     email: Some("jane@uni.edu".into()),
    ///     major: None,
    ///     location: Some("City".into()),
    /// };
    /// let created = tokio_test::block_on(svc.create(req.validate_create().unwrap())).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.email, "jane@uni.edu");
    /// ```
    #[instrument(skip(self, input), fields(student_id = %input.student_id))]
    pub async fn create(&self, input: NewStudent) -> Result<StudentResponse, ServiceError> {
        if self.repo.exists_by_student_id(&input.student_id).await? {
            warn!("duplicate student_id");
            return Err(ServiceError::already_exists("Student ID", &input.student_id));
        }
        if self.repo.exists_by_email(&input.email).await? {
            warn!(email = %input.email, "duplicate email");
            return Err(ServiceError::already_exists("Email", &input.email));
        }
        let created = self.repo.insert(&input).await?;
        info!(id = created.id, "student_created");
        Ok(created.into())
    }

    pub async fn list_all(&self) -> Result<Vec<StudentResponse>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(StudentResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<StudentResponse, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(StudentResponse::from)
            .ok_or_else(|| not_found(id))
    }

    /// Overwrite the supplied fields of an existing student.
    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i32, changes: StudentChanges) -> Result<StudentResponse, ServiceError> {
        let Some(existing) = self.repo.find_by_id(id).await? else {
            return Err(not_found(id));
        };
        if changes.is_empty() {
            return Ok(existing.into());
        }
        if let Some(sid) = changes.student_id.as_deref() {
            if let Some(other) = self.repo.find_by_student_id(sid).await? {
                if other.id != id {
                    warn!(conflicting_id = other.id, "student_id taken by another record");
                    return Err(ServiceError::already_exists("Student ID", sid));
                }
            }
        }
        if let Some(email) = changes.email.as_deref() {
            if let Some(other) = self.repo.find_by_email(email).await? {
                if other.id != id {
                    warn!(conflicting_id = other.id, "email taken by another record");
                    return Err(ServiceError::already_exists("Email", email));
                }
            }
        }
        // Row may vanish between the existence check and the write.
        let updated = self.repo.update(id, &changes).await?.ok_or_else(|| not_found(id))?;
        info!(id, "student_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete_by_id(id).await? {
            return Err(not_found(id));
        }
        info!(id, "student_deleted");
        Ok(())
    }
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Student with id {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::dto::StudentRequest;
    use crate::student::repository::mock::MockStudentRepository;

    fn svc() -> StudentService<MockStudentRepository> {
        StudentService::new(Arc::new(MockStudentRepository::default()))
    }

    fn input(student_id: &str, email: &str) -> NewStudent {
        NewStudent {
            student_id: student_id.into(),
            full_name: "Jane Doe".into(),
            email: email.into(),
            major: Some("Biology".into()),
            location: "City".into(),
        }
    }

    #[tokio::test]
    async fn create_echoes_input_with_new_id() {
        let s = svc();
        let created = s.create(input("S12345678", "jane@uni.edu")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.student_id, "S12345678");
        assert_eq!(created.full_name, "Jane Doe");
        assert_eq!(created.email, "jane@uni.edu");
        assert_eq!(created.major.as_deref(), Some("Biology"));
        assert_eq!(created.location, "City");

        let second = s.create(input("S87654321", "john@uni.edu")).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_student_id_or_email() {
        let s = svc();
        s.create(input("S12345678", "jane@uni.edu")).await.unwrap();

        let dup_id = s.create(input("S12345678", "other@uni.edu")).await;
        assert!(matches!(dup_id, Err(ServiceError::Conflict(ref m)) if m.contains("S12345678")));

        let dup_email = s.create(input("S87654321", "jane@uni.edu")).await;
        assert!(matches!(dup_email, Err(ServiceError::Conflict(ref m)) if m.contains("jane@uni.edu")));

        assert_eq!(s.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let res = svc().get_by_id(42).await;
        assert!(matches!(res, Err(ServiceError::NotFound(ref m)) if m == "Student with id 42 not found"));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let s = svc();
        let created = s.create(input("S12345678", "jane@uni.edu")).await.unwrap();

        let changes = StudentRequest { location: Some("Town".into()), ..StudentRequest::default() }
            .validate_update()
            .unwrap();
        let updated = s.update(created.id, changes).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.location, "Town");
        assert_eq!(updated.full_name, created.full_name);
        assert_eq!(updated.major, created.major);

        let fetched = s.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn update_keeping_own_unique_keys_is_allowed() {
        let s = svc();
        let created = s.create(input("S12345678", "jane@uni.edu")).await.unwrap();
        let changes = StudentChanges {
            student_id: Some("S12345678".into()),
            email: Some("jane@uni.edu".into()),
            ..StudentChanges::default()
        };
        assert!(s.update(created.id, changes).await.is_ok());
    }

    #[tokio::test]
    async fn update_rejects_keys_owned_by_another_record() {
        let s = svc();
        s.create(input("S12345678", "jane@uni.edu")).await.unwrap();
        let john = s.create(input("S87654321", "john@uni.edu")).await.unwrap();

        let steal_id = StudentChanges { student_id: Some("S12345678".into()), ..StudentChanges::default() };
        assert!(matches!(s.update(john.id, steal_id).await, Err(ServiceError::Conflict(_))));

        let steal_email = StudentChanges { email: Some("jane@uni.edu".into()), ..StudentChanges::default() };
        assert!(matches!(s.update(john.id, steal_email).await, Err(ServiceError::Conflict(_))));

        assert_eq!(s.get_by_id(john.id).await.unwrap().email, "john@uni.edu");
    }

    #[tokio::test]
    async fn empty_update_returns_record_untouched() {
        let s = svc();
        let created = s.create(input("S12345678", "jane@uni.edu")).await.unwrap();
        let same = s.update(created.id, StudentChanges::default()).await.unwrap();
        assert_eq!(same, created);
        assert_eq!(same.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let res = svc().update(7, StudentChanges::default()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let s = svc();
        let created = s.create(input("S12345678", "jane@uni.edu")).await.unwrap();
        s.delete(created.id).await.unwrap();
        assert!(matches!(s.get_by_id(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(s.delete(created.id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_all_counts_creates() {
        let s = svc();
        assert!(s.list_all().await.unwrap().is_empty());
        for n in 0..3 {
            s.create(input(&format!("S{:08}", n), &format!("s{}@uni.edu", n))).await.unwrap();
        }
        let all = s.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn works_behind_a_trait_object() {
        let repo: Arc<dyn StudentRepository> = Arc::new(MockStudentRepository::default());
        let s: StudentService<dyn StudentRepository> = StudentService::new(repo);
        let created = s.create(input("S12345678", "jane@uni.edu")).await.unwrap();
        assert_eq!(s.get_by_id(created.id).await.unwrap().student_id, "S12345678");
    }
}
