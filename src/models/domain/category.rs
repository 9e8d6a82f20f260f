use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_by: String, // Coach that owns the category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: &str, created_by: &str) -> Self {
        Category {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_by: created_by.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}
