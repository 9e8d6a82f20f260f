pub mod access_gate;
pub mod attempt_service;
pub mod category_service;
pub mod grading;
pub mod question_service;
pub mod quiz_composer;
pub mod quiz_service;
pub mod stats_service;
pub mod system_config_service;
pub mod user_service;

pub use access_gate::{can_access, AccessDecision, Requester};
pub use attempt_service::AttemptService;
pub use category_service::CategoryService;
pub use grading::{grade_attempt, GradedAttempt};
pub use question_service::QuestionService;
pub use quiz_composer::{ComposedQuestions, CompositionRequest, QuizComposer, SelectionCriterion};
pub use quiz_service::QuizService;
pub use stats_service::StatsService;
pub use system_config_service::SystemConfigService;
pub use user_service::UserService;
