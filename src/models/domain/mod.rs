pub mod attempt;
pub mod category;
pub mod question;
pub mod quiz;
pub mod system_config;
pub mod user;
pub use attempt::{Attempt, AttemptAnswer};
pub use category::Category;
pub use question::{Question, QuestionOption};
pub use quiz::{Quiz, QuizMode, QuizQuestionRef};
pub use system_config::SystemConfig;
pub use user::{ApprovalStatus, User, UserRole};
