use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, ATTEMPTS_COLLECTION},
    errors::AppResult,
    models::domain::Attempt,
};

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>>;
    async fn list_all(&self) -> AppResult<Vec<Attempt>>;
    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>>;
    async fn list_by_quizzes(&self, quiz_ids: &[String]) -> AppResult<Vec<Attempt>>;
}

pub struct MongoAttemptRepository {
    collection: Collection<Attempt>,
}

impl MongoAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(ATTEMPTS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let student_index = IndexModel::builder()
            .keys(doc! { "studentId": 1 })
            .options(
                IndexOptions::builder()
                    .name("student_id".to_string())
                    .build(),
            )
            .build();

        let quiz_index = IndexModel::builder()
            .keys(doc! { "quizId": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(student_index).await?;
        self.collection.create_index(quiz_index).await?;

        log::info!("Successfully created indexes for attempts collection");
        Ok(())
    }

    async fn find_newest_first(&self, filter: Document) -> AppResult<Vec<Attempt>> {
        let attempts = self
            .collection
            .find(filter)
            .sort(doc! { "completedAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }
}

#[async_trait]
impl AttemptRepository for MongoAttemptRepository {
    async fn create(&self, attempt: Attempt) -> AppResult<Attempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Attempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn list_all(&self) -> AppResult<Vec<Attempt>> {
        self.find_newest_first(doc! {}).await
    }

    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<Attempt>> {
        self.find_newest_first(doc! { "studentId": student_id }).await
    }

    async fn list_by_quizzes(&self, quiz_ids: &[String]) -> AppResult<Vec<Attempt>> {
        if quiz_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_newest_first(doc! { "quizId": { "$in": quiz_ids } })
            .await
    }
}
