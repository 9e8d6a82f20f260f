use crate::models::domain::{ApprovalStatus, Question, QuestionOption, User, UserRole};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A coach that has already been approved by a super admin.
    pub fn approved_coach(email: &str) -> User {
        let mut coach = User::test_user(UserRole::Coach, email);
        coach.status = ApprovalStatus::Approved;
        coach
    }

    pub fn student_of(coach: &User, email: &str) -> User {
        User::new_student_of(&coach.id, "Test Student", email, "not-a-real-hash", None)
    }

    /// Three-option question whose option at `correct` is flagged correct.
    pub fn question(coach: &User, category_id: &str, default_score: i32, correct: usize) -> Question {
        let options = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, text)| QuestionOption::new(text, None, i == correct))
            .collect();
        Question::new("Sample question", None, options, category_id, &coach.id, default_score)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_fixtures_approved_coach() {
        let coach = approved_coach("coach@example.com");
        assert_eq!(coach.role, UserRole::Coach);
        assert!(coach.is_approved());
    }

    #[test]
    fn test_fixtures_student_is_affiliated() {
        let coach = approved_coach("coach@example.com");
        let student = student_of(&coach, "student@example.com");
        assert_eq!(student.coaching_id.as_deref(), Some(coach.id.as_str()));
    }

    #[test]
    fn test_fixtures_question_has_one_correct_option() {
        let coach = approved_coach("coach@example.com");
        let q = question(&coach, "cat-1", 2, 1);

        assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);
        assert_eq!(q.correct_option().map(|o| o.text.as_str()), Some("B"));
    }
}
