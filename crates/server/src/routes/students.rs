use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use common::ApiResponse;
use service::errors::ServiceError;
use service::student::dto::{StudentRequest, StudentResponse};
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

type ApiResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;

/// Ids outside the key range cannot name a stored record.
fn student_key(Path(id): Path<i64>) -> Result<i32, JsonApiError> {
    i32::try_from(id).map_err(|_| ServiceError::NotFound(format!("Student with id {} not found", id)).into())
}

#[utoipa::path(
    post, path = "/api/v1/student", tag = "student",
    request_body = crate::openapi::StudentRequestDoc,
    responses(
        (status = 201, description = "Student created successfully", body = crate::openapi::StudentEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorEnvelopeDoc),
        (status = 409, description = "Duplicate studentId or email", body = crate::openapi::ErrorEnvelopeDoc)
    )
)]
pub async fn create_student(
    State(state): State<ServerState>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), JsonApiError> {
    let Json(request) = payload?;
    info!(student_id = ?request.student_id, "Initiating Student creation");
    let input = request.validate_create().map_err(ServiceError::Validation)?;
    let created = state.students.create(input).await?;
    info!(id = created.id, student_id = %created.student_id, "created student");
    Ok((StatusCode::CREATED, Json(ApiResponse::success_with("Student created successfully", created))))
}

#[utoipa::path(
    get, path = "/api/v1/student", tag = "student",
    responses((status = 200, description = "List OK", body = crate::openapi::StudentListEnvelopeDoc))
)]
pub async fn get_all_students(State(state): State<ServerState>) -> ApiResult<Vec<StudentResponse>> {
    info!("Retrieving all Students");
    let list = state.students.list_all().await?;
    info!(count = list.len(), "listed students");
    Ok(Json(ApiResponse::success(list)))
}

#[utoipa::path(
    get, path = "/api/v1/student/{id}", tag = "student",
    params(("id" = i64, Path, description = "Student primary key")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorEnvelopeDoc)
    )
)]
pub async fn get_student_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StudentResponse> {
    let id = student_key(id?)?;
    info!(id, "Retrieving Student by id");
    let found = state.students.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(found)))
}

#[utoipa::path(
    put, path = "/api/v1/student/{id}", tag = "student",
    params(("id" = i64, Path, description = "Student primary key")),
    request_body = crate::openapi::StudentRequestDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentEnvelopeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorEnvelopeDoc),
        (status = 409, description = "Duplicate studentId or email", body = crate::openapi::ErrorEnvelopeDoc)
    )
)]
pub async fn update_student(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentRequest>, JsonRejection>,
) -> ApiResult<StudentResponse> {
    let id = student_key(id?)?;
    let Json(request) = payload?;
    info!(id, "Updating Student by id");
    let changes = request.validate_update().map_err(ServiceError::Validation)?;
    let updated = state.students.update(id, changes).await?;
    info!(id = updated.id, "updated student");
    Ok(Json(ApiResponse::success(updated)))
}

#[utoipa::path(
    delete, path = "/api/v1/student/{id}", tag = "student",
    params(("id" = i64, Path, description = "Student primary key")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::EmptyEnvelopeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorEnvelopeDoc)
    )
)]
pub async fn delete_student(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let id = student_key(id?)?;
    info!(id, "Deleting Student by id");
    state.students.delete(id).await?;
    info!(id, "deleted student");
    Ok(Json(ApiResponse::empty()))
}
