use crate::{
    errors::{AppError, AppResult},
    models::domain::{Quiz, User, UserRole},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(String),
    PaymentRequired,
}

impl AccessDecision {
    pub fn into_result(self) -> AppResult<()> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(reason) => Err(AppError::Forbidden(reason)),
            AccessDecision::PaymentRequired => Err(AppError::PaymentRequired(
                "This quiz is part of a paid collection".to_string(),
            )),
        }
    }
}

/// The parts of a user the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: String,
    pub role: UserRole,
    pub coaching_id: Option<String>,
}

impl From<&User> for Requester {
    fn from(user: &User) -> Self {
        Requester {
            id: user.id.clone(),
            role: user.role,
            coaching_id: user.coaching_id.clone(),
        }
    }
}

/// Decides whether `requester` may view or attempt `quiz`. Never cached:
/// callers evaluate it on every fetch and again before grading.
pub fn can_access(quiz: &Quiz, requester: &Requester) -> AccessDecision {
    match requester.role {
        UserRole::SuperAdmin => AccessDecision::Allow,
        UserRole::Coach => {
            if quiz.created_by == requester.id {
                AccessDecision::Allow
            } else {
                AccessDecision::Deny("Coaches can only open their own quizzes".to_string())
            }
        }
        UserRole::Student => {
            if !quiz.is_active {
                return AccessDecision::Deny("This quiz is not currently available".to_string());
            }
            if !quiz.is_paid {
                return AccessDecision::Allow;
            }
            match requester.coaching_id.as_deref() {
                Some(coach_id) if coach_id == quiz.created_by => AccessDecision::Allow,
                _ => AccessDecision::PaymentRequired,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::QuizMode;

    fn quiz_by(coach: &str, is_active: bool, is_paid: bool) -> Quiz {
        let mut quiz = Quiz::new("Kinematics", None, coach, QuizMode::Manual, vec![], None);
        quiz.is_active = is_active;
        quiz.is_paid = is_paid;
        quiz
    }

    fn student(coaching_id: Option<&str>) -> Requester {
        Requester {
            id: "student-1".to_string(),
            role: UserRole::Student,
            coaching_id: coaching_id.map(str::to_string),
        }
    }

    fn coach(id: &str) -> Requester {
        Requester {
            id: id.to_string(),
            role: UserRole::Coach,
            coaching_id: None,
        }
    }

    #[test]
    fn coach_can_only_open_own_quiz() {
        let quiz = quiz_by("coach-a", true, false);

        assert_eq!(can_access(&quiz, &coach("coach-a")), AccessDecision::Allow);
        assert!(matches!(
            can_access(&quiz, &coach("coach-b")),
            AccessDecision::Deny(_)
        ));
    }

    #[test]
    fn coach_can_open_own_inactive_quiz() {
        let quiz = quiz_by("coach-a", false, true);
        assert_eq!(can_access(&quiz, &coach("coach-a")), AccessDecision::Allow);
    }

    #[test]
    fn inactive_quiz_is_denied_to_every_student() {
        for (is_paid, coaching) in [
            (false, None),
            (true, None),
            (true, Some("coach-a")),
            (false, Some("coach-a")),
        ] {
            let quiz = quiz_by("coach-a", false, is_paid);
            assert!(
                matches!(can_access(&quiz, &student(coaching)), AccessDecision::Deny(_)),
                "paid={} coaching={:?}",
                is_paid,
                coaching
            );
        }
    }

    #[test]
    fn free_active_quiz_is_open_to_any_student() {
        let quiz = quiz_by("coach-a", true, false);

        assert_eq!(can_access(&quiz, &student(None)), AccessDecision::Allow);
        assert_eq!(
            can_access(&quiz, &student(Some("coach-b"))),
            AccessDecision::Allow
        );
    }

    #[test]
    fn paid_quiz_requires_affiliation() {
        let quiz = quiz_by("coach-a", true, true);

        assert_eq!(
            can_access(&quiz, &student(Some("coach-a"))),
            AccessDecision::Allow
        );
        assert_eq!(
            can_access(&quiz, &student(Some("coach-b"))),
            AccessDecision::PaymentRequired
        );
        assert_eq!(
            can_access(&quiz, &student(None)),
            AccessDecision::PaymentRequired
        );
    }

    #[test]
    fn super_admin_is_always_allowed() {
        let quiz = quiz_by("coach-a", false, true);
        let admin = Requester {
            id: "admin".to_string(),
            role: UserRole::SuperAdmin,
            coaching_id: None,
        };

        assert_eq!(can_access(&quiz, &admin), AccessDecision::Allow);
    }

    #[test]
    fn decisions_map_to_error_taxonomy() {
        assert!(AccessDecision::Allow.into_result().is_ok());
        assert!(matches!(
            AccessDecision::Deny("no".into()).into_result(),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            AccessDecision::PaymentRequired.into_result(),
            Err(AppError::PaymentRequired(_))
        ));
    }
}
