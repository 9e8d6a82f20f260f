use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const REVENUE_SHARE_PERCENTAGE: &str = "REVENUE_SHARE_PERCENTAGE";
pub const DEFAULT_REVENUE_SHARE: f64 = 90.0;

/// Singleton value per key.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    pub key: String,
    pub value: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SystemConfig {
    pub fn new(key: &str, value: serde_json::Value) -> Self {
        SystemConfig {
            key: key.to_string(),
            value,
            updated_at: Some(Utc::now()),
        }
    }

    /// Numeric view of the value; settings forms submit numbers as strings.
    pub fn as_f64(&self) -> Option<f64> {
        match &self.value {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
