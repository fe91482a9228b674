use std::sync::Arc;

use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::student::{
    repo::seaorm::SeaOrmStudentRepository,
    repository::StudentRepository,
    service::StudentService,
};

use crate::openapi::ApiDoc;

pub mod students;

/// Shared handler state; cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub students: Arc<StudentService<dyn StudentRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { students: Arc::new(StudentService::new(repo)) }
    }

    /// State backed by the SeaORM repository.
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(Arc::new(SeaOrmStudentRepository::new(db)))
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: health, API docs and the student API.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let student_routes = Router::new()
        .route(
            "/api/v1/student",
            get(students::get_all_students).post(students::create_student),
        )
        .route(
            "/api/v1/student/:id",
            get(students::get_student_by_id)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        .with_state(state);

    // Compose
    public
        .merge(student_routes)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 请求到达时打点
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
