use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String, // Never exposed, see UserDto
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coaching_id: Option<String>, // Student -> Coach affiliation
    pub status: ApprovalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Coach,
    #[default]
    Student,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "SUPER_ADMIN",
            UserRole::Coach => "COACH",
            UserRole::Student => "STUDENT",
        }
    }
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "PENDING",
            ApprovalStatus::Approved => "APPROVED",
            ApprovalStatus::Rejected => "REJECTED",
        }
    }
}

impl User {
    /// Coaches start PENDING; every other role is approved on creation.
    pub fn new(
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
        phone_number: Option<String>,
    ) -> Self {
        let status = match role {
            UserRole::Coach => ApprovalStatus::Pending,
            UserRole::Student | UserRole::SuperAdmin => ApprovalStatus::Approved,
        };

        User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: normalize_email(email),
            password_hash: password_hash.to_string(),
            role,
            coaching_id: None,
            status,
            rejection_reason: None,
            phone_number,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn new_student_of(
        coach_id: &str,
        name: &str,
        email: &str,
        password_hash: &str,
        phone_number: Option<String>,
    ) -> Self {
        let mut student = User::new(name, email, password_hash, UserRole::Student, phone_number);
        student.coaching_id = Some(coach_id.to_string());
        student
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }

    /// Apply a super-admin decision. Only PENDING coaches can be decided.
    pub fn decide(&mut self, status: ApprovalStatus, reason: Option<String>) -> AppResult<()> {
        if self.role != UserRole::Coach {
            return Err(AppError::ValidationError(
                "Approval decisions apply to coach accounts only".to_string(),
            ));
        }

        match (self.status, status) {
            (ApprovalStatus::Pending, ApprovalStatus::Approved) => {
                self.rejection_reason = None;
            }
            (ApprovalStatus::Pending, ApprovalStatus::Rejected) => {
                self.rejection_reason = reason.filter(|r| !r.trim().is_empty());
            }
            (from, to) => {
                return Err(AppError::ValidationError(format!(
                    "Cannot move coach from {} to {}",
                    from.as_str(),
                    to.as_str()
                )));
            }
        }

        self.status = status;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
impl User {
    pub fn test_user(role: UserRole, email: &str) -> Self {
        User::new("Test User", email, "not-a-real-hash", role, None)
    }
}
