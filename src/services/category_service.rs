use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Category,
        dto::{request::CreateCategoryRequest, response::CategorySummary},
    },
    repositories::{CategoryRepository, QuestionRepository},
};

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            categories,
            questions,
        }
    }

    pub async fn create_category(
        &self,
        request: CreateCategoryRequest,
        coach_id: &str,
    ) -> AppResult<Category> {
        request.validate()?;

        if request.name.trim().is_empty() {
            return Err(AppError::ValidationError("Category name is required".to_string()));
        }

        let category = self
            .categories
            .create(Category::new(&request.name, coach_id))
            .await
            .map_err(|e| match e {
                AppError::AlreadyExists(_) => AppError::AlreadyExists(format!(
                    "Category '{}' already exists",
                    request.name.trim()
                )),
                other => other,
            })?;

        log::info!("Coach {} created category {}", coach_id, category.id);
        Ok(category)
    }

    pub async fn list_categories(&self, coach_id: &str) -> AppResult<Vec<CategorySummary>> {
        let categories = self.categories.list_by_creator(coach_id).await?;
        let counts = self.questions.count_by_category(coach_id).await?;

        Ok(categories
            .into_iter()
            .map(|c| CategorySummary {
                question_count: counts.get(&c.id).copied().unwrap_or(0),
                id: c.id,
                name: c.name,
                created_at: c.created_at,
            })
            .collect())
    }
}
