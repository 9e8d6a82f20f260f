use std::{collections::HashSet, sync::Arc};

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, QuizMode, QuizQuestionRef},
        dto::request::CriterionInput,
    },
    repositories::QuestionRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCriterion {
    pub category_id: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositionRequest {
    Manual(Vec<String>),
    Random(Vec<SelectionCriterion>),
}

impl CompositionRequest {
    /// Builds a request from the loose create-quiz payload. Random mode
    /// keeps only criteria with a category and a positive count and fails
    /// when none are left.
    pub fn from_payload(
        mode: QuizMode,
        question_ids: Option<Vec<String>>,
        criteria: Option<Vec<CriterionInput>>,
    ) -> AppResult<Self> {
        match mode {
            QuizMode::Manual => Ok(CompositionRequest::Manual(question_ids.unwrap_or_default())),
            QuizMode::Random => {
                let valid = valid_criteria(criteria.as_deref().unwrap_or_default());
                if valid.is_empty() {
                    return Err(AppError::ValidationError(
                        "Random quizzes need at least one criterion with a category and a positive count"
                            .to_string(),
                    ));
                }
                Ok(CompositionRequest::Random(valid))
            }
        }
    }
}

pub fn valid_criteria(inputs: &[CriterionInput]) -> Vec<SelectionCriterion> {
    inputs
        .iter()
        .filter_map(|c| {
            let category_id = c.category_id.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
            let count = c.count.filter(|n| *n > 0)?;
            Some(SelectionCriterion {
                category_id: category_id.to_string(),
                count: count as usize,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuestions {
    pub questions: Vec<QuizQuestionRef>,
    pub total_marks: i32,
}

impl ComposedQuestions {
    /// Fails when the scores add up past what a quiz total can hold.
    fn from_questions<'a>(questions: impl IntoIterator<Item = &'a Question>) -> AppResult<Self> {
        let questions: Vec<QuizQuestionRef> = questions
            .into_iter()
            .map(|q| QuizQuestionRef {
                question_id: q.id.clone(),
                score: q.default_score,
            })
            .collect();
        let total_marks = questions
            .iter()
            .try_fold(0i32, |total, q| total.checked_add(q.score))
            .ok_or_else(|| {
                AppError::ValidationError("Total marks of the selected questions are too large".to_string())
            })?;

        Ok(ComposedQuestions {
            questions,
            total_marks,
        })
    }
}

/// Orders the owned questions the way the coach listed them, once each.
/// Requested ids that are not among `owned` are dropped.
fn in_requested_order<'a>(requested: &[String], owned: &'a [Question]) -> Vec<&'a Question> {
    let mut seen = HashSet::new();

    requested
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| owned.iter().find(|q| &q.id == id))
        .collect()
}

pub struct QuizComposer {
    questions: Arc<dyn QuestionRepository>,
}

impl QuizComposer {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Resolves the fixed question set for a new quiz owned by `coach_id`.
    pub async fn compose(
        &self,
        request: &CompositionRequest,
        coach_id: &str,
    ) -> AppResult<ComposedQuestions> {
        match request {
            CompositionRequest::Manual(ids) => {
                let owned = self.questions.find_owned_by_ids(coach_id, ids).await?;
                if owned.len() < ids.len() {
                    log::debug!(
                        "Dropped {} requested question(s) not owned by coach {}",
                        ids.len() - owned.len(),
                        coach_id
                    );
                }
                ComposedQuestions::from_questions(in_requested_order(ids, &owned))
            }
            CompositionRequest::Random(criteria) => {
                let mut picked = Vec::new();
                for criterion in criteria {
                    let sample = self
                        .questions
                        .sample_by_category(coach_id, &criterion.category_id, criterion.count)
                        .await?;
                    if sample.len() < criterion.count {
                        log::debug!(
                            "Category {} has {} of {} requested questions",
                            criterion.category_id,
                            sample.len(),
                            criterion.count
                        );
                    }
                    picked.extend(sample);
                }
                ComposedQuestions::from_questions(&picked)
            }
        }
    }
}
