//! Student handlers (bearer-authenticated, tenant from token)

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use edu_core::domain::{NewStudent, Student};

use crate::error::ApiError;
use crate::extractors::Authenticated;
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

/// GET /api/v1/students
pub async fn list_students(
    State(state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> Result<Json<ApiResponse<Vec<Student>>>, ApiError> {
    let students = state.student_service.list(&ctx).await?;
    Ok(Json(ApiResponse::success(students)))
}

/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    Authenticated(ctx): Authenticated,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<Created<Student>, ApiError> {
    let Json(payload) = payload?;
    let student = state.student_service.create(&ctx, payload).await?;
    Ok(ApiResponse::created(student))
}
