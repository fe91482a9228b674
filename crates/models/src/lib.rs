//! Persistence models for the student registry.
//! - SeaORM entity definitions with their field-level validation rules.
//! - Connection helpers driven by the `configs` crate.

pub mod errors;
pub mod db;
pub mod student;

#[cfg(test)]
mod tests;
