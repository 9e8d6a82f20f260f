use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::UserRole,
        dto::response::{CoachStats, PlatformStats},
    },
    repositories::{QuestionRepository, QuizRepository, UserRepository},
    services::system_config_service::SystemConfigService,
};

pub struct StatsService {
    users: Arc<dyn UserRepository>,
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    system_config: Arc<SystemConfigService>,
}

impl StatsService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        system_config: Arc<SystemConfigService>,
    ) -> Self {
        Self {
            users,
            quizzes,
            questions,
            system_config,
        }
    }

    pub async fn coach_stats(&self, coach_id: &str) -> AppResult<CoachStats> {
        Ok(CoachStats {
            student_count: self.users.count_students_of(coach_id).await?,
            quiz_count: self.quizzes.count_by_creator(coach_id).await?,
        })
    }

    pub async fn platform_stats(&self) -> AppResult<PlatformStats> {
        Ok(PlatformStats {
            coach_count: self.users.count_by_role(UserRole::Coach).await?,
            question_count: self.questions.count_all().await?,
            total_usage: self.questions.total_usage().await?,
            revenue_share: self.system_config.revenue_share().await?,
        })
    }
}
