use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState, auth::ApprovedCoach, errors::AppError,
    models::dto::request::CreateCategoryRequest,
};

#[post("/categories")]
async fn create_category(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let category = state
        .category_service
        .create_category(request.into_inner(), &coach.0.id)
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("/categories")]
async fn list_categories(
    state: web::Data<AppState>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let categories = state.category_service.list_categories(&coach.0.id).await?;
    Ok(HttpResponse::Ok().json(categories))
}
