use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequestDoc {
    /// 8-15 characters, unique
    pub student_id: Option<String>,
    /// Up to 60 characters
    pub full_name: Option<String>,
    /// Valid email address, unique
    pub email: Option<String>,
    /// Up to 30 characters
    pub major: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponseDoc {
    pub id: i32,
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub major: Option<String>,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentEnvelopeDoc { pub code: u16, pub message: String, pub data: Option<StudentResponseDoc> }

#[derive(Serialize, ToSchema)]
pub struct StudentListEnvelopeDoc { pub code: u16, pub message: String, pub data: Vec<StudentResponseDoc> }

#[derive(Serialize, ToSchema)]
pub struct EmptyEnvelopeDoc { pub code: u16, pub message: String }

#[derive(Serialize, ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

/// Error envelope; `data` lists field errors on validation failures, null otherwise.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelopeDoc { pub code: u16, pub message: String, pub data: Option<Vec<FieldErrorDoc>> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::create_student,
        crate::routes::students::get_all_students,
        crate::routes::students::get_student_by_id,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            StudentRequestDoc,
            StudentResponseDoc,
            StudentEnvelopeDoc,
            StudentListEnvelopeDoc,
            EmptyEnvelopeDoc,
            FieldErrorDoc,
            ErrorEnvelopeDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "student")
    )
)]
pub struct ApiDoc;
