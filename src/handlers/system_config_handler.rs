use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{require_super_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::UpsertSystemConfigRequest,
};

#[get("/system-config")]
async fn list_system_config(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let configs = state.system_config_service.list().await?;
    Ok(HttpResponse::Ok().json(configs))
}

#[post("/system-config")]
async fn upsert_system_config(
    state: web::Data<AppState>,
    request: web::Json<UpsertSystemConfigRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_super_admin(&auth.0)?;

    let config = state
        .system_config_service
        .upsert(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(config))
}
