//! Service layer providing student CRUD operations on top of models.
//! - Separates business logic from data access via `StudentRepository`.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Boundary DTOs validate into typed inputs before the service runs.

pub mod errors;
pub mod validation;
pub mod student;
#[cfg(test)]
pub mod test_support;
