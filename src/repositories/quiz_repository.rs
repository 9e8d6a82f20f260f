use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{Database, QUIZZES_COLLECTION},
    errors::AppResult,
    models::domain::Quiz,
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    async fn list_all(&self) -> AppResult<Vec<Quiz>>;
    async fn list_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>>;
    async fn list_active_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>>;
    /// Active quizzes from every coach, newest first, optionally filtered by a
    /// case-insensitive title substring.
    async fn list_active_paginated(
        &self,
        search: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Quiz>, u64)>;
    async fn count_by_creator(&self, created_by: &str) -> AppResult<u64>;
    /// Only matches a quiz owned by `created_by`.
    async fn set_active(&self, id: &str, created_by: &str, is_active: bool) -> AppResult<Option<Quiz>>;
    async fn set_paid(&self, id: &str, is_paid: bool) -> AppResult<Option<Quiz>>;
}

pub struct MongoQuizRepository {
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUIZZES_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let created_by_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1 })
            .options(
                IndexOptions::builder()
                    .name("created_by".to_string())
                    .build(),
            )
            .build();

        let active_index = IndexModel::builder()
            .keys(doc! { "isActive": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("active_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(created_by_index).await?;
        self.collection.create_index(active_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }

    async fn find_sorted(&self, filter: Document) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn update_flag(&self, filter: Document, field: &str, value: bool) -> AppResult<Option<Quiz>> {
        let mut set = doc! { "updatedAt": to_bson(&Utc::now())? };
        set.insert(field, value);
        let update = doc! { "$set": set };

        let quiz = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(quiz)
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_all(&self) -> AppResult<Vec<Quiz>> {
        self.find_sorted(doc! {}).await
    }

    async fn list_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>> {
        self.find_sorted(doc! { "createdBy": created_by }).await
    }

    async fn list_active_by_creator(&self, created_by: &str) -> AppResult<Vec<Quiz>> {
        self.find_sorted(doc! { "createdBy": created_by, "isActive": true })
            .await
    }

    async fn list_active_paginated(
        &self,
        search: Option<&str>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Quiz>, u64)> {
        let mut filter = doc! { "isActive": true };

        if let Some(term) = search {
            filter.insert(
                "title",
                doc! { "$regex": regex::escape(term), "$options": "i" },
            );
        }

        let total = self.collection.count_documents(filter.clone()).await?;

        let quizzes = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .skip(offset)
            .limit(limit as i64)
            .await?
            .try_collect()
            .await?;

        Ok((quizzes, total))
    }

    async fn count_by_creator(&self, created_by: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "createdBy": created_by })
            .await?;
        Ok(count)
    }

    async fn set_active(&self, id: &str, created_by: &str, is_active: bool) -> AppResult<Option<Quiz>> {
        self.update_flag(doc! { "id": id, "createdBy": created_by }, "isActive", is_active)
            .await
    }

    async fn set_paid(&self, id: &str, is_paid: bool) -> AppResult<Option<Quiz>> {
        self.update_flag(doc! { "id": id }, "isPaid", is_paid).await
    }
}
