use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, UserRole},
        dto::{
            request::{CreateQuizRequest, MarketplaceQuery},
            response::{MarketplacePage, QuizForAttempt},
        },
    },
    repositories::{QuestionRepository, QuizRepository},
    services::{
        access_gate::{can_access, AccessDecision, Requester},
        quiz_composer::{CompositionRequest, QuizComposer},
    },
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    composer: QuizComposer,
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        let composer = QuizComposer::new(Arc::clone(&questions));
        Self {
            quizzes,
            questions,
            composer,
        }
    }

    pub async fn create_quiz(&self, request: CreateQuizRequest, coach_id: &str) -> AppResult<Quiz> {
        request.validate()?;

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::ValidationError("Quiz title is required".to_string()))?;
        let mode = request
            .mode
            .ok_or_else(|| AppError::ValidationError("Quiz mode is required".to_string()))?;

        let composition = CompositionRequest::from_payload(mode, request.questions, request.criteria)?;
        let composed = self.composer.compose(&composition, coach_id).await?;

        let quiz = Quiz::new(
            title,
            request.description,
            coach_id,
            mode,
            composed.questions,
            request.duration,
        );
        debug_assert_eq!(quiz.total_marks, composed.total_marks);

        let quiz = self.quizzes.create(quiz).await?;
        log::info!(
            "Coach {} created {:?} quiz {} with {} question(s), {} marks",
            coach_id,
            quiz.mode,
            quiz.id,
            quiz.questions.len(),
            quiz.total_marks
        );
        Ok(quiz)
    }

    /// Loads a quiz and runs the access gate for `requester`.
    pub async fn authorize(&self, quiz_id: &str, requester: &Requester) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        let decision = can_access(&quiz, requester);
        if decision != AccessDecision::Allow {
            log::warn!(
                "Access to quiz {} refused for {} {}: {:?}",
                quiz.id,
                requester.role.as_str(),
                requester.id,
                decision
            );
        }
        decision.into_result()?;

        Ok(quiz)
    }

    /// The quiz with its questions expanded for taking it. Correctness flags
    /// never leave this method.
    pub async fn fetch_for_attempt(
        &self,
        quiz_id: &str,
        requester: &Requester,
    ) -> AppResult<QuizForAttempt> {
        let quiz = self.authorize(quiz_id, requester).await?;
        let questions = self.questions.find_by_ids(&quiz.question_ids()).await?;

        Ok(QuizForAttempt::expand(quiz, &questions))
    }

    pub async fn list_for(&self, requester: &Requester) -> AppResult<Vec<Quiz>> {
        match requester.role {
            UserRole::SuperAdmin => self.quizzes.list_all().await,
            UserRole::Coach => self.quizzes.list_by_creator(&requester.id).await,
            UserRole::Student => match requester.coaching_id.as_deref() {
                Some(coach_id) => self.quizzes.list_active_by_creator(coach_id).await,
                None => Ok(Vec::new()),
            },
        }
    }

    pub async fn set_active(&self, quiz_id: &str, coach_id: &str, is_active: bool) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .set_active(quiz_id, coach_id, is_active)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        log::info!("Coach {} set quiz {} active={}", coach_id, quiz_id, is_active);
        Ok(quiz)
    }

    pub async fn set_paid(&self, quiz_id: &str, is_paid: bool) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .set_paid(quiz_id, is_paid)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", quiz_id)))?;

        log::info!("Quiz {} set paid={}", quiz_id, is_paid);
        Ok(quiz)
    }

    pub async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        self.quizzes.list_all().await
    }

    pub async fn marketplace(&self, query: &MarketplaceQuery) -> AppResult<MarketplacePage> {
        query.validate()?;

        let (quizzes, total) = self
            .quizzes
            .list_active_paginated(query.search(), query.offset(), query.limit())
            .await?;

        let has_more = query.offset().saturating_add(quizzes.len() as u64) < total;

        Ok(MarketplacePage {
            quizzes,
            has_more,
            total,
            current_page: query.page(),
        })
    }
}
