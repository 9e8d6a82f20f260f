use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::CurrentUser,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest},
        response::ApprovalStatusResponse,
    },
};

#[post("/register")]
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.user_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Approval status page data; reachable by pending and rejected coaches.
#[get("/me/status")]
async fn me_status(user: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(ApprovalStatusResponse::from(&user.0)))
}
