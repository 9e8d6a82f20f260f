use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, QUESTIONS_COLLECTION},
    errors::AppResult,
    models::domain::Question,
    repositories::bson_to_i64,
};

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> AppResult<Question>;
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>>;
    /// Only the questions among `ids` that `created_by` owns.
    async fn find_owned_by_ids(&self, created_by: &str, ids: &[String]) -> AppResult<Vec<Question>>;
    async fn list_by_creator(
        &self,
        created_by: &str,
        category_id: Option<&str>,
    ) -> AppResult<Vec<Question>>;
    /// Up to `count` distinct questions drawn uniformly at random.
    async fn sample_by_category(
        &self,
        created_by: &str,
        category_id: &str,
        count: usize,
    ) -> AppResult<Vec<Question>>;
    async fn count_by_category(&self, created_by: &str) -> AppResult<HashMap<String, u64>>;
    async fn increment_usage(&self, id: &str) -> AppResult<()>;
    async fn count_all(&self) -> AppResult<u64>;
    async fn total_usage(&self) -> AppResult<i64>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUESTIONS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_category_index = IndexModel::builder()
            .keys(doc! { "createdBy": 1, "categoryId": 1 })
            .options(
                IndexOptions::builder()
                    .name("created_by_category".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_category_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let questions = self
            .collection
            .find(doc! { "id": { "$in": ids } })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn find_owned_by_ids(&self, created_by: &str, ids: &[String]) -> AppResult<Vec<Question>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let questions = self
            .collection
            .find(doc! { "id": { "$in": ids }, "createdBy": created_by })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn list_by_creator(
        &self,
        created_by: &str,
        category_id: Option<&str>,
    ) -> AppResult<Vec<Question>> {
        let mut filter = doc! { "createdBy": created_by };

        if let Some(cid) = category_id {
            filter.insert("categoryId", cid);
        }

        let questions = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(questions)
    }

    async fn sample_by_category(
        &self,
        created_by: &str,
        category_id: &str,
        count: usize,
    ) -> AppResult<Vec<Question>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let pipeline = vec![
            doc! { "$match": { "categoryId": category_id, "createdBy": created_by } },
            doc! { "$sample": { "size": count as i64 } },
        ];

        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        let questions = documents
            .into_iter()
            .map(from_document::<Question>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(questions)
    }

    async fn count_by_category(&self, created_by: &str) -> AppResult<HashMap<String, u64>> {
        let pipeline = vec![
            doc! { "$match": { "createdBy": created_by } },
            doc! { "$group": { "_id": "$categoryId", "count": { "$sum": 1 } } },
        ];

        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        let counts = documents
            .iter()
            .filter_map(|d| {
                let category_id = d.get_str("_id").ok()?.to_string();
                Some((category_id, bson_to_i64(d.get("count")).max(0) as u64))
            })
            .collect();
        Ok(counts)
    }

    async fn increment_usage(&self, id: &str) -> AppResult<()> {
        self.collection
            .update_one(doc! { "id": id }, doc! { "$inc": { "usageCount": 1_i64 } })
            .await?;
        Ok(())
    }

    async fn count_all(&self) -> AppResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    async fn total_usage(&self) -> AppResult<i64> {
        let pipeline = vec![doc! {
            "$group": { "_id": null, "totalUsage": { "$sum": "$usageCount" } }
        }];

        let documents: Vec<Document> = self
            .collection
            .aggregate(pipeline)
            .await?
            .try_collect()
            .await?;

        Ok(documents
            .first()
            .map(|d| bson_to_i64(d.get("totalUsage")))
            .unwrap_or(0))
    }
}
