#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;
use secrecy::SecretString;
use tokio::sync::RwLock;

use apex_quiz_server::{
    app_state::{AppState, Repositories},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        ApprovalStatus, Attempt, Category, Question, QuestionOption, Quiz, SystemConfig, User,
        UserRole,
    },
    repositories::{
        AttemptRepository, CategoryRepository, QuestionRepository, QuizRepository,
        SystemConfigRepository, UserRepository,
    },
};

// Every in-memory store keeps insertion order; "newest first" is reverse order.

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.id == user.id || u.email == user.email) {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        status: Option<ApprovalStatus>,
    ) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .rev()
            .filter(|u| u.role == role && status.map_or(true, |s| u.status == s))
            .cloned()
            .collect())
    }

    async fn list_students_of(&self, coach_id: &str) -> AppResult<Vec<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .rev()
            .filter(|u| u.role == UserRole::Student && u.coaching_id.as_deref() == Some(coach_id))
            .cloned()
            .collect())
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        Ok(self.users.read().await.iter().filter(|u| u.role == role).count() as u64)
    }

    async fn count_students_of(&self, coach_id: &str) -> AppResult<u64> {
        Ok(self.list_students_of(coach_id).await?.len() as u64)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user.id)))?;
        *slot = user.clone();
        Ok(user)
    }
}

#[derive(Default)]
pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> AppResult<Category> {
        let mut categories = self.categories.write().await;
        if categories
            .iter()
            .any(|c| c.name == category.name && c.created_by == category.created_by)
        {
            return Err(AppError::AlreadyExists(format!(
                "Category '{}' already exists",
                category.name
            )));
        }
        categories.push(category.clone());
        Ok(category)
    }

    async fn find_owned(&self, id: &str, created_by: &str) -> AppResult<Option<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .find(|c| c.id == id && c.created_by == created_by)
            .cloned())
    }

    async fn list_by_creator(&self, created_by: &str) -> AppResult<Vec<Category>> {
        Ok(self
            .categories
            .read()
            .await
            .iter()
            .rev()
            .filter(|c| c.created_by == created_by)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

impl InMemoryQuestionRepository {
    pub async fn usage_of(&self, id: &str) -> i64 {
        self.questions
            .read()
            .await
            .iter()
            .find(|q| q.id == id)
            .map(|q| q.usage_count)
            .unwrap_or(0)
    }

    pub async fn remove(&self, id: &str) {
        self.questions.write().await.retain(|q| q.id != id);
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn find_owned_by_ids(&self, created_by: &str, ids: &[String]) -> AppResult<Vec<Question>> {
        Ok(self
            .find_by_ids(ids)
            .await?
            .into_iter()
            .filter(|q| q.created_by == created_by)
            .collect())
    }

    async fn list_by_creator(
        &self,
        created_by: &str,
        category_id: Option<&str>,
    ) -> AppResult<Vec<Question>> {
        Ok(self
            .questions
            .read()
            .await
            .iter()
            .rev()
            .filter(|q| q.created_by == created_by)
            .filter(|q| category_id.map_or(true, |c| q.category_id == c))
            .cloned()
            .collect())
    }

    async fn sample_by_category(
        &self,
        created_by: &str,
        category_id: &str,
        count: usize,
    ) -> AppResult<Vec<Question>> {
        let pool = self.list_by_creator(created_by, Some(category_id)).await?;
        Ok(pool
            .choose_multiple(&mut rand::thread_rng(), count)
            .cloned()
            .collect())
    }

    async fn count_by_category(&self, created_by: &str) -> AppResult<HashMap<String, u64>> {
        let mut counts = HashMap::new();
        for q in self.list_by_creator(created_by, None).await? {
            *counts.entry(q.category_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn increment_usage(&self, id: &str) -> AppResult<()> {
        if let Some(q) = self.questions.write().await.iter_mut().find(|q| q.id == id) {
            q.usage_count += 1;
        }
        Ok(())
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(self.questions.read().await.len() as u64)
    }

    async fn total_usage(&self) -> AppResult<i64> {
        Ok(self.questions.read().await.iter().map(|q| q.usage_count).sum())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<Vec<Quiz>>,
}

impl InMemoryQuizRepository {
    async fn update_where(
        &self,
        matches: impl Fn(&Quiz) -> bool + Send,
        apply: impl FnOnce(&mut Quiz) + Send,
    ) -> Option<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes.iter_mut().find(|q| matches(q))?;
        apply(quiz);
        quiz.updated_at = Some(Utc::now());
        Some(quiz.clone())
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes.write().await.push(quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.iter().find(|q| q.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        Ok(self.quizzes.read().await.iter().rev().cloned().collect())
    }

    async fn list_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>> {
        Ok(self
            .quizzes
            .read()
            .await
            .iter()
            .rev()
            .filter(|q| q.created_by == created_by)
            .cloned()
            .collect())
    }

    async fn list_active_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>> {
        Ok(self
            .list_by_creator(created_by)
            .await?
            .into_iter()
            .filter(|q| q.is_active)
            .collect())
    }

    async fn list_active_paginated(
        &self,
        search: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Quiz>, u64)> {
        let needle = search.map(str::to_lowercase);
        let matching: Vec<Quiz> = self
            .quizzes
            .read()
            .await
            .iter()
            .rev()
            .filter(|q| q.is_active)
            .filter(|q| {
                needle
                    .as_deref()
                    .map_or(true, |n| q.title.to_lowercase().contains(n))
            })
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn count_by_creator(&self, created_by: &str) -> AppResult<u64> {
        Ok(self.list_by_creator(created_by).await?.len() as u64)
    }

    async fn set_active(&self, id: &str, created_by: &str, is_active: bool) -> AppResult<Option<Quiz>> {
        Ok(self
            .update_where(
                |q| q.id == id && q.created_by == created_by,
                |q| q.is_active = is_active,
            )
            .await)
    }

    async fn set_paid(&self, id: &str, is_paid: bool) -> AppResult<Option<Quiz>> {
        Ok(self
            .update_where(|q| q.id == id, |q| q.is_paid = is_paid)
            .await)
    }
}

#[derive(Default)]
pub struct InMemoryAttemptRepository {
    attempts: RwLock<Vec<Attempt>>,
}

impl InMemoryAttemptRepository {
    pub async fn count(&self) -> usize {
        self.attempts.read().await.len()
    }
}

#[async_trait]
impl AttemptRepository for InMemoryAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.attempts.write().await.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>> {
        Ok(self.attempts.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Attempt>> {
        Ok(self.attempts.read().await.iter().rev().cloned().collect())
    }

    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>> {
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_by_quizzes(&self, quiz_ids: &[String]) -> AppResult<Vec<Attempt>> {
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| quiz_ids.contains(&a.quiz_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySystemConfigRepository {
    configs: RwLock<HashMap<String, SystemConfig>>,
}

#[async_trait]
impl SystemConfigRepository for InMemorySystemConfigRepository {
    async fn upsert(&self, key: &str, value: serde_json::Value) -> AppResult<SystemConfig> {
        let config = SystemConfig::new(key, value);
        self.configs
            .write()
            .await
            .insert(key.to_string(), config.clone());
        Ok(config)
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<SystemConfig>> {
        Ok(self.configs.read().await.get(key).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<SystemConfig>> {
        let mut configs: Vec<_> = self.configs.read().await.values().cloned().collect();
        configs.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(configs)
    }
}

/// Concrete handles alongside the trait objects so tests can inspect state.
#[derive(Clone, Default)]
pub struct Stores {
    pub users: Arc<InMemoryUserRepository>,
    pub categories: Arc<InMemoryCategoryRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub attempts: Arc<InMemoryAttemptRepository>,
    pub system_config: Arc<InMemorySystemConfigRepository>,
}

impl Stores {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: self.users.clone(),
            categories: self.categories.clone(),
            questions: self.questions.clone(),
            quizzes: self.quizzes.clone(),
            attempts: self.attempts.clone(),
            system_config: self.system_config.clone(),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        app_env: "test".to_string(),
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "apex-quiz-test".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        cors_allowed_origin: "http://localhost:3000".to_string(),
        jwt_secret: SecretString::from("integration_test_secret".to_string()),
        jwt_expiration_hours: 1,
        super_admin_email: None,
        super_admin_password: None,
    }
}

pub fn test_state() -> (AppState, Stores) {
    let stores = Stores::default();
    let state = AppState::from_repositories(stores.repositories(), test_config());
    (state, stores)
}

pub async fn seed_user(stores: &Stores, user: User) -> User {
    stores.users.create(user).await.expect("seed user")
}

pub async fn seed_approved_coach(stores: &Stores, email: &str) -> User {
    let mut coach = User::new("Coach", email, "unused-hash", UserRole::Coach, None);
    coach.status = ApprovalStatus::Approved;
    seed_user(stores, coach).await
}

pub async fn seed_student(stores: &Stores, coach: Option<&User>, email: &str) -> User {
    let student = match coach {
        Some(c) => User::new_student_of(&c.id, "Student", email, "unused-hash", None),
        None => User::new("Student", email, "unused-hash", UserRole::Student, None),
    };
    seed_user(stores, student).await
}

pub async fn seed_category(stores: &Stores, coach: &User, name: &str) -> Category {
    stores
        .categories
        .create(Category::new(name, &coach.id))
        .await
        .expect("seed category")
}

/// Question with options "A", "B", "C"; `correct` indexes the correct one.
pub async fn seed_question(
    stores: &Stores,
    coach: &User,
    category: &Category,
    default_score: i32,
    correct: usize,
) -> Question {
    let options = ["A", "B", "C"]
        .iter()
        .enumerate()
        .map(|(i, text)| QuestionOption::new(text, None, i == correct))
        .collect();
    let question = Question::new(
        "Sample question",
        None,
        options,
        &category.id,
        &coach.id,
        default_score,
    );
    stores.questions.create(question).await.expect("seed question")
}
