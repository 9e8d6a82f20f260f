use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::ApprovedCoach,
    errors::AppError,
    models::dto::request::{CreateQuestionRequest, QuestionListQuery},
};

#[post("/questions")]
async fn create_question(
    state: web::Data<AppState>,
    request: web::Json<CreateQuestionRequest>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .create_question(request.into_inner(), &coach.0.id)
        .await?;
    Ok(HttpResponse::Created().json(question))
}

#[get("/questions")]
async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<QuestionListQuery>,
    coach: ApprovedCoach,
) -> Result<HttpResponse, AppError> {
    let category_id = query.category_id.as_deref().filter(|c| !c.is_empty());
    let questions = state
        .question_service
        .list_questions(&coach.0.id, category_id)
        .await?;
    Ok(HttpResponse::Ok().json(questions))
}
