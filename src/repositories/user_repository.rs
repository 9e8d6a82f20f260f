use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{Database, USERS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{ApprovalStatus, User, UserRole},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn list_by_role(
        &self,
        role: UserRole,
        status: Option<ApprovalStatus>,
    ) -> AppResult<Vec<User>>;
    async fn list_students_of(&self, coach_id: &str) -> AppResult<Vec<User>>;
    async fn count_by_role(&self, role: UserRole) -> AppResult<u64>;
    async fn count_students_of(&self, coach_id: &str) -> AppResult<u64>;
    async fn update(&self, user: User) -> AppResult<User>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USERS_COLLECTION);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let unique = IndexOptions::builder().unique(true).build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(unique.clone())
            .build();
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(unique)
            .build();

        self.collection.create_index(email_index).await?;
        self.collection.create_index(id_index).await?;
        log::info!("Created unique indexes on users.email and users.id");

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        status: Option<ApprovalStatus>,
    ) -> AppResult<Vec<User>> {
        let mut filter = doc! { "role": role.as_str() };

        if let Some(s) = status {
            filter.insert("status", s.as_str());
        }

        let users = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    async fn list_students_of(&self, coach_id: &str) -> AppResult<Vec<User>> {
        let students = self
            .collection
            .find(doc! { "role": UserRole::Student.as_str(), "coachingId": coach_id })
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(students)
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "role": role.as_str() })
            .await?;
        Ok(count)
    }

    async fn count_students_of(&self, coach_id: &str) -> AppResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "role": UserRole::Student.as_str(), "coachingId": coach_id })
            .await?;
        Ok(count)
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let result = self
            .collection
            .replace_one(doc! { "id": user.id.as_str() }, &user)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user.id
            )));
        }

        Ok(user)
    }
}
