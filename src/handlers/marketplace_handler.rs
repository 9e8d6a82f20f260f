use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::MarketplaceQuery};

#[get("")]
async fn marketplace(
    state: web::Data<AppState>,
    query: web::Query<MarketplaceQuery>,
) -> Result<HttpResponse, AppError> {
    let page = state.quiz_service.marketplace(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}
