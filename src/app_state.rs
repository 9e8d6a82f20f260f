use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AttemptRepository, CategoryRepository, MongoAttemptRepository, MongoCategoryRepository,
        MongoQuestionRepository, MongoQuizRepository, MongoSystemConfigRepository,
        MongoUserRepository, QuestionRepository, QuizRepository, SystemConfigRepository,
        UserRepository,
    },
    services::{
        AttemptService, CategoryService, QuestionService, QuizService, StatsService,
        SystemConfigService, UserService,
    },
};

/// One repository per entity, built once at startup.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
    pub system_config: Arc<dyn SystemConfigRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub question_service: Arc<QuestionService>,
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub stats_service: Arc<StatsService>,
    pub system_config_service: Arc<SystemConfigService>,
    pub jwt_service: JwtService,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let users = Arc::new(MongoUserRepository::new(&db));
        users.ensure_indexes().await?;
        let categories = Arc::new(MongoCategoryRepository::new(&db));
        categories.ensure_indexes().await?;
        let questions = Arc::new(MongoQuestionRepository::new(&db));
        questions.ensure_indexes().await?;
        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;
        let attempts = Arc::new(MongoAttemptRepository::new(&db));
        attempts.ensure_indexes().await?;
        let system_config = Arc::new(MongoSystemConfigRepository::new(&db));
        system_config.ensure_indexes().await?;

        let repositories = Repositories {
            users,
            categories,
            questions,
            quizzes,
            attempts,
            system_config,
        };

        let mut state = Self::from_repositories(repositories, config);
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over any repository implementation. No database
    /// handle is attached, so readiness checks report the store as down.
    pub fn from_repositories(repositories: Repositories, config: Config) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        let user_service = Arc::new(UserService::new(
            Arc::clone(&repositories.users),
            jwt_service.clone(),
        ));
        let category_service = Arc::new(CategoryService::new(
            Arc::clone(&repositories.categories),
            Arc::clone(&repositories.questions),
        ));
        let question_service = Arc::new(QuestionService::new(
            Arc::clone(&repositories.questions),
            Arc::clone(&repositories.categories),
        ));
        let quiz_service = Arc::new(QuizService::new(
            Arc::clone(&repositories.quizzes),
            Arc::clone(&repositories.questions),
        ));
        let attempt_service = Arc::new(AttemptService::new(
            Arc::clone(&repositories.attempts),
            Arc::clone(&repositories.quizzes),
            Arc::clone(&repositories.questions),
            Arc::clone(&repositories.users),
            Arc::clone(&quiz_service),
        ));
        let system_config_service = Arc::new(SystemConfigService::new(Arc::clone(
            &repositories.system_config,
        )));
        let stats_service = Arc::new(StatsService::new(
            Arc::clone(&repositories.users),
            Arc::clone(&repositories.quizzes),
            Arc::clone(&repositories.questions),
            Arc::clone(&system_config_service),
        ));

        Self {
            user_service,
            category_service,
            question_service,
            quiz_service,
            attempt_service,
            stats_service,
            system_config_service,
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
