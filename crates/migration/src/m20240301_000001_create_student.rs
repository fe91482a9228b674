//! Create `student` table.
//!
//! `id` is store-assigned; `student_id` and `email` carry unique constraints.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(pk_auto(Student::Id))
                    .col(string_len(Student::StudentId, 15).unique_key().not_null())
                    .col(string_len(Student::FullName, 60).not_null())
                    .col(string_len(Student::Email, 100).unique_key().not_null())
                    // Optional column; declared explicitly so NULL is allowed
                    .col(ColumnDef::new(Student::Major).string_len(30).null())
                    .col(string_len(Student::Location, 100).not_null())
                    .col(timestamp_with_time_zone(Student::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Student::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Student::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Id, StudentId, FullName, Email, Major, Location, CreatedAt, UpdatedAt }
