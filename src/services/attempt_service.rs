use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Attempt, UserRole},
        dto::{
            request::SubmitAttemptRequest,
            response::{StudentAttempts, UserDto},
        },
    },
    repositories::{AttemptRepository, QuestionRepository, QuizRepository, UserRepository},
    services::{access_gate::Requester, grading::grade_attempt, quiz_service::QuizService},
};

pub struct AttemptService {
    attempts: Arc<dyn AttemptRepository>,
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
    quiz_service: Arc<QuizService>,
}

impl AttemptService {
    pub fn new(
        attempts: Arc<dyn AttemptRepository>,
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        users: Arc<dyn UserRepository>,
        quiz_service: Arc<QuizService>,
    ) -> Self {
        Self {
            attempts,
            quizzes,
            questions,
            users,
            quiz_service,
        }
    }

    /// Grades and stores one submission. Usage counters are bumped per graded
    /// answer before the attempt is written; the two steps are not atomic.
    pub async fn submit(
        &self,
        request: SubmitAttemptRequest,
        student: &Requester,
    ) -> AppResult<Attempt> {
        let quiz_id = request
            .quiz_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("quizId is required".to_string()))?;
        let answers = request
            .answers
            .ok_or_else(|| AppError::ValidationError("answers are required".to_string()))?;

        let quiz = self.quiz_service.authorize(quiz_id, student).await?;
        let questions = self.questions.find_by_ids(&quiz.question_ids()).await?;

        let graded = grade_attempt(&quiz, &questions, &answers);

        for answer in &graded.answers {
            self.questions.increment_usage(&answer.question_id).await?;
        }

        let attempt = Attempt::new(
            &student.id,
            &quiz.id,
            graded.answers,
            graded.score,
            request.started_at,
        );
        let attempt = self.attempts.create(attempt).await?;

        log::info!(
            "Student {} scored {}/{} on quiz {}",
            student.id,
            attempt.score,
            quiz.total_marks,
            quiz.id
        );
        Ok(attempt)
    }

    pub async fn list_for(&self, requester: &Requester) -> AppResult<Vec<Attempt>> {
        match requester.role {
            UserRole::SuperAdmin => self.attempts.list_all().await,
            UserRole::Student => self.attempts.list_by_student(&requester.id).await,
            UserRole::Coach => {
                let quiz_ids: Vec<String> = self
                    .quizzes
                    .list_by_creator(&requester.id)
                    .await?
                    .into_iter()
                    .map(|q| q.id)
                    .collect();
                self.attempts.list_by_quizzes(&quiz_ids).await
            }
        }
    }

    pub async fn get_for(&self, attempt_id: &str, requester: &Requester) -> AppResult<Attempt> {
        let attempt = self
            .attempts
            .find_by_id(attempt_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", attempt_id)))?;

        let allowed = match requester.role {
            UserRole::SuperAdmin => true,
            UserRole::Student => attempt.student_id == requester.id,
            UserRole::Coach => self
                .quizzes
                .find_by_id(&attempt.quiz_id)
                .await?
                .is_some_and(|quiz| quiz.created_by == requester.id),
        };

        if !allowed {
            log::warn!(
                "{} {} tried to read attempt {}",
                requester.role.as_str(),
                requester.id,
                attempt_id
            );
            return Err(AppError::Forbidden(
                "You can only view your own attempts".to_string(),
            ));
        }

        Ok(attempt)
    }

    /// History of one of the coach's own students.
    pub async fn attempts_of_student(
        &self,
        coach_id: &str,
        student_id: &str,
    ) -> AppResult<StudentAttempts> {
        let student = self
            .users
            .find_by_id(student_id)
            .await?
            .filter(|u| u.role == UserRole::Student && u.coaching_id.as_deref() == Some(coach_id))
            .ok_or_else(|| AppError::NotFound(format!("Student with id '{}' not found", student_id)))?;

        let attempts = self.attempts.list_by_student(&student.id).await?;

        Ok(StudentAttempts {
            student: UserDto::from(student),
            attempts,
        })
    }
}
