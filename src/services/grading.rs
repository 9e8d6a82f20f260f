use std::collections::{HashMap, HashSet};

use crate::models::{
    domain::{AttemptAnswer, Question, Quiz},
    dto::request::AnswerInput,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradedAttempt {
    pub score: i32,
    /// Answers that were actually graded, in submission order.
    pub answers: Vec<AttemptAnswer>,
}

/// Scores `submitted` against the quiz's question snapshot.
///
/// An answer is processed only when its question belongs to the quiz and the
/// question document is present in `questions`. Repeated answers to the same
/// question keep the first one. A correct answer earns the score stored on the
/// quiz, not the question's current default score. Option ids are compared as
/// opaque strings.
pub fn grade_attempt(quiz: &Quiz, questions: &[Question], submitted: &[AnswerInput]) -> GradedAttempt {
    let by_id: HashMap<&str, &Question> = questions.iter().map(|q| (q.id.as_str(), q)).collect();

    let mut seen = HashSet::new();
    let mut score: i32 = 0;
    let mut answers = Vec::new();

    for answer in submitted {
        let Some(points) = quiz.score_for(&answer.question_id) else {
            continue;
        };
        let Some(question) = by_id.get(answer.question_id.as_str()) else {
            continue;
        };
        if !seen.insert(answer.question_id.as_str()) {
            continue;
        }

        let is_correct = question
            .correct_option()
            .is_some_and(|option| option.id == answer.selected_option_id);

        if is_correct {
            score = score.saturating_add(points);
        }

        answers.push(AttemptAnswer {
            question_id: answer.question_id.clone(),
            selected_option_id: answer.selected_option_id.clone(),
        });
    }

    GradedAttempt { score, answers }
}
