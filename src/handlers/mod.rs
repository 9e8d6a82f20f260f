pub mod admin_handler;
pub mod attempt_handler;
pub mod auth_handler;
pub mod category_handler;
pub mod coach_handler;
pub mod health_handler;
pub mod marketplace_handler;
pub mod question_handler;
pub mod quiz_handler;
pub mod system_config_handler;

use actix_web::web;

use crate::{
    auth::AuthMiddleware,
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
    services::Requester,
};

/// Gate input for the caller. Coaches reach shared routes only once approved.
pub(crate) fn requester_of(user: &User) -> AppResult<Requester> {
    if user.role == UserRole::Coach && !user.is_approved() {
        return Err(AppError::Forbidden(format!(
            "Coach account is {}",
            user.status.as_str()
        )));
    }
    Ok(Requester::from(user))
}

/// Registers every route. Public scopes come first so they are matched
/// before the authenticated `/api` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health_handler::health_check)
    .service(health_handler::health_check_live)
    .service(health_handler::health_check_ready)
    .service(
        web::scope("/api/auth")
            .service(auth_handler::register)
            .service(auth_handler::login),
    )
    .service(web::scope("/api/marketplace").service(marketplace_handler::marketplace))
    .service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(auth_handler::me_status)
            .service(category_handler::create_category)
            .service(category_handler::list_categories)
            .service(question_handler::create_question)
            .service(question_handler::list_questions)
            .service(quiz_handler::create_quiz)
            .service(quiz_handler::list_quizzes)
            .service(quiz_handler::get_quiz)
            .service(quiz_handler::toggle_quiz_active)
            .service(attempt_handler::submit_attempt)
            .service(attempt_handler::list_attempts)
            .service(attempt_handler::get_attempt)
            .service(coach_handler::coach_stats)
            .service(coach_handler::list_students)
            .service(coach_handler::create_student)
            .service(coach_handler::student_attempts)
            .service(admin_handler::list_all_quizzes)
            .service(admin_handler::set_quiz_paid)
            .service(admin_handler::pending_coaches)
            .service(admin_handler::review_coach)
            .service(admin_handler::approved_coaches)
            .service(admin_handler::platform_stats)
            .service(system_config_handler::list_system_config)
            .service(system_config_handler::upsert_system_config),
    );
}
