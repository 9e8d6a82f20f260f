use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_student, AuthenticatedUser, CurrentUser},
    errors::AppError,
    handlers::requester_of,
    models::dto::request::SubmitAttemptRequest,
};

#[post("/attempts")]
async fn submit_attempt(
    state: web::Data<AppState>,
    request: web::Json<SubmitAttemptRequest>,
    auth: AuthenticatedUser,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    require_student(&auth.0)?;

    let requester = requester_of(&user.0)?;
    let attempt = state
        .attempt_service
        .submit(request.into_inner(), &requester)
        .await?;
    Ok(HttpResponse::Created().json(attempt))
}

#[get("/attempts")]
async fn list_attempts(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let requester = requester_of(&user.0)?;
    let attempts = state.attempt_service.list_for(&requester).await?;
    Ok(HttpResponse::Ok().json(attempts))
}

#[get("/attempts/{id}")]
async fn get_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let requester = requester_of(&user.0)?;
    let attempt = state.attempt_service.get_for(&id, &requester).await?;
    Ok(HttpResponse::Ok().json(attempt))
}
