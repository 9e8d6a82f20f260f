use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, auth::ApprovedCoach, errors::AppError,
    models::dto::request::CreateStudentRequest,
};

#[get("/coach/stats")]
async fn coach_stats(
    state: web::Data<AppState>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let stats = state.stats_service.coach_stats(&coach.0.id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/coach/students")]
async fn list_students(
    state: web::Data<AppState>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let students = state.user_service.list_students(&coach.0.id).await?;
    Ok(HttpResponse::Ok().json(students))
}

#[post("/coach/students")]
async fn create_student(
    state: web::Data<AppState>,
    request: web::Json<CreateStudentRequest>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let student = state
        .user_service
        .create_student(&coach.0.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(student))
}

#[get("/coach/students/{id}/attempts")]
async fn student_attempts(
    state: web::Data<AppState>,
    id: web::Path<String>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let history = state
        .attempt_service
        .attempts_of_student(&coach.0.id, &id)
        .await?;
    Ok(HttpResponse::Ok().json(history))
}
