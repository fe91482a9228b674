//! Field-level validation results collected at the request boundary.

use std::fmt;

use models::errors::ModelError;
use serde::Serialize;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors for one request, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errs = Self::new();
        errs.push(field, message);
        errs
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError { field: field.to_string(), message: message.into() });
    }

    /// Record the outcome of a model-level validator against `field`.
    pub fn check(&mut self, field: &str, result: Result<(), ModelError>) {
        if let Err(e) = result {
            let msg = match e {
                ModelError::Validation(m) => m,
                other => other.to_string(),
            };
            self.push(field, msg);
        }
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn errors(&self) -> &[FieldError] { &self.0 }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        f.write_str(&parts.join("; "))
    }
}
