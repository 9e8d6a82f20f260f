use actix_web::{get, patch, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{ApprovedCoach, CurrentUser},
    errors::AppError,
    handlers::requester_of,
    models::dto::{
        request::{CreateQuizRequest, ToggleQuizActiveRequest},
        response::QuizUpdatedResponse,
    },
};

#[post("/quizzes")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), &coach.0.id)
        .await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[get("/quizzes")]
async fn list_quizzes(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let requester = requester_of(&user.0)?;
    let quizzes = state.quiz_service.list_for(&requester).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/quizzes/{id}")]
async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let requester = requester_of(&user.0)?;
    let quiz = state
        .quiz_service
        .fetch_for_attempt(&id, &requester)
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[patch("/quizzes/{id}")]
async fn toggle_quiz_active(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<ToggleQuizActiveRequest>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .set_active(&id, &coach.0.id, request.is_active)
        .await?;
    Ok(HttpResponse::Ok().json(QuizUpdatedResponse {
        message: "Quiz updated".to_string(),
        quiz,
    }))
}
