use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform envelope around every API payload: `{ code, message, data }`.
///
/// `data` is always present in the JSON, as `null` when there is no payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub const SUCCESS_CODE: u16 = 200;
    pub const SUCCESS_MESSAGE: &'static str = "Operation success!";

    pub fn success(data: T) -> Self {
        Self::success_with(Self::SUCCESS_MESSAGE, data)
    }

    pub fn success_with(message: impl Into<String>, data: T) -> Self {
        Self { code: Self::SUCCESS_CODE, message: message.into(), data: Some(data) }
    }

    /// Success without a payload (`data: null`).
    pub fn empty() -> Self {
        Self { code: Self::SUCCESS_CODE, message: Self::SUCCESS_MESSAGE.to_string(), data: None }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    /// Error that still carries a payload, e.g. field-level validation details.
    pub fn error_with(code: u16, message: impl Into<String>, data: T) -> Self {
        Self { code, message: message.into(), data: Some(data) }
    }
}
