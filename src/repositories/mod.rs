pub mod attempt_repository;
pub mod category_repository;
pub mod question_repository;
pub mod quiz_repository;
pub mod system_config_repository;
pub mod user_repository;

pub use attempt_repository::{AttemptRepository, MongoAttemptRepository};
pub use category_repository::{CategoryRepository, MongoCategoryRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use system_config_repository::{MongoSystemConfigRepository, SystemConfigRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

use mongodb::bson::Bson;

/// Numeric aggregation results come back as Int32 or Int64 depending on the inputs.
pub(crate) fn bson_to_i64(value: Option<&Bson>) -> i64 {
    match value {
        Some(Bson::Int32(n)) => *n as i64,
        Some(Bson::Int64(n)) => *n,
        Some(Bson::Double(n)) => *n as i64,
        _ => 0,
    }
}
