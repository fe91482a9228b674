use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use models::student;
use crate::errors::ServiceError;
use crate::student::dto::{NewStudent, StudentChanges};
use crate::student::repository::StudentRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_by_student_id(&self, student_id: &str) -> Result<Option<student::Model>, ServiceError> {
        let res = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn exists_by_student_id(&self, student_id: &str) -> Result<bool, ServiceError> {
        let n = student::Entity::find()
            .filter(student::Column::StudentId.eq(student_id))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<student::Model>, ServiceError> {
        let res = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(res)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        let n = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(n > 0)
    }

    async fn find_all(&self) -> Result<Vec<student::Model>, ServiceError> {
        let rows = student::Entity::find()
            .order_by_asc(student::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<student::Model>, ServiceError> {
        Ok(student::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert(&self, input: &NewStudent) -> Result<student::Model, ServiceError> {
        // validations are in models::student
        let created = student::create(
            &self.db,
            &input.student_id,
            &input.full_name,
            &input.email,
            input.major.as_deref(),
            &input.location,
        )
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i32, changes: &StudentChanges) -> Result<Option<student::Model>, ServiceError> {
        let current = student::Entity::find_by_id(id).one(&self.db).await?;
        let Some(existing) = current else { return Ok(None) };
        let mut am: student::ActiveModel = existing.into();
        if let Some(v) = &changes.student_id { am.student_id = Set(v.clone()); }
        if let Some(v) = &changes.full_name { am.full_name = Set(v.clone()); }
        if let Some(v) = &changes.email { am.email = Set(v.clone()); }
        if let Some(v) = &changes.major { am.major = Set(v.clone()); }
        if let Some(v) = &changes.location { am.location = Set(v.clone()); }
        am.updated_at = Set(Utc::now().into());
        let updated = am.update(&self.db).await?;
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(student::hard_delete(&self.db, id).await?)
    }
}
