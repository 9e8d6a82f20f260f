use actix_web::{get, patch, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_super_admin, AuthenticatedUser},
    errors::AppError,
    models::{
        domain::ApprovalStatus,
        dto::{
            request::{ReviewCoachRequest, SetQuizPaidRequest},
            response::QuizUpdatedResponse,
        },
    },
};
use validator::Validate;

#[get("/admin/quizzes")]
async fn list_all_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let quizzes = state.quiz_service.list_all().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[patch("/admin/quizzes")]
async fn set_quiz_paid(
    state: web::Data<AppState>,
    request: web::Json<SetQuizPaidRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;
    request.validate()?;

    let quiz = state
        .quiz_service
        .set_paid(&request.quiz_id, request.is_paid)
        .await?;
    Ok(HttpResponse::Ok().json(QuizUpdatedResponse {
        message: "Quiz updated".to_string(),
        quiz,
    }))
}

#[get("/admin/requests")]
async fn pending_coaches(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let coaches = state
        .user_service
        .list_coaches(ApprovalStatus::Pending)
        .await?;
    Ok(HttpResponse::Ok().json(coaches))
}

#[patch("/admin/requests")]
async fn review_coach(
    state: web::Data<AppState>,
    request: web::Json<ReviewCoachRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let response = state.user_service.review_coach(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/admin/coaches")]
async fn approved_coaches(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let coaches = state
        .user_service
        .list_coaches(ApprovalStatus::Approved)
        .await?;
    Ok(HttpResponse::Ok().json(coaches))
}

#[get("/admin/stats")]
async fn platform_stats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let stats = state.stats_service.platform_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}
