use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, JwtService},
    errors::{AppError, AppResult},
    models::{
        domain::{user::normalize_email, ApprovalStatus, User, UserRole},
        dto::{
            request::{CreateStudentRequest, LoginRequest, RegisterRequest, ReviewCoachRequest},
            response::{AuthResponse, RegisterResponse, ReviewCoachResponse, UserDto},
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    jwt_service: JwtService,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, jwt_service: JwtService) -> Self {
        Self {
            repository,
            jwt_service,
        }
    }

    async fn ensure_email_free(&self, email: &str) -> AppResult<()> {
        if self.repository.find_by_email(email).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "User with email '{}' already exists",
                email
            )));
        }
        Ok(())
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        request.validate()?;

        if request.role == UserRole::SuperAdmin {
            return Err(AppError::ValidationError(
                "Super admin accounts cannot be registered".to_string(),
            ));
        }

        let email = normalize_email(&request.email);
        self.ensure_email_free(&email).await?;

        let password_hash = hash_password(&request.password)?;
        let user = User::new(
            &request.name,
            &email,
            &password_hash,
            request.role,
            request.phone_number,
        );
        let user = self.repository.create(user).await?;

        log::info!(
            "Registered {} {} with status {}",
            user.role.as_str(),
            user.id,
            user.status.as_str()
        );

        let message = match user.status {
            ApprovalStatus::Pending => "Registration successful. Your account is awaiting approval",
            _ => "Registration successful",
        };

        Ok(RegisterResponse {
            message: message.to_string(),
            user_id: user.id,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate()?;

        let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

        let user = self
            .repository
            .find_by_email(&normalize_email(&request.email))
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&request.password, &user.password_hash)? {
            log::warn!("Failed login for user {}", user.id);
            return Err(invalid());
        }

        let token = self.jwt_service.create_token(&user)?;

        Ok(AuthResponse {
            token,
            user: UserDto::from(user),
        })
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }

    /// Gate for every coach route: the caller must be a coach whose current
    /// stored status is APPROVED.
    pub async fn require_approved_coach(&self, id: &str) -> AppResult<User> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;

        if user.role != UserRole::Coach {
            return Err(AppError::Forbidden(
                "Only coaches can perform this action".to_string(),
            ));
        }

        if !user.is_approved() {
            log::warn!(
                "Coach {} with status {} tried to use the dashboard",
                user.id,
                user.status.as_str()
            );
            return Err(AppError::Forbidden(format!(
                "Coach account is {}",
                user.status.as_str()
            )));
        }

        Ok(user)
    }

    pub async fn create_student(
        &self,
        coach_id: &str,
        request: CreateStudentRequest,
    ) -> AppResult<UserDto> {
        request.validate()?;

        let email = normalize_email(&request.email);
        self.ensure_email_free(&email).await?;

        let password_hash = hash_password(&request.password)?;
        let student = User::new_student_of(
            coach_id,
            &request.name,
            &email,
            &password_hash,
            request.phone_number,
        );
        let student = self.repository.create(student).await?;

        log::info!("Coach {} enrolled student {}", coach_id, student.id);
        Ok(UserDto::from(student))
    }

    pub async fn list_students(&self, coach_id: &str) -> AppResult<Vec<UserDto>> {
        let students = self.repository.list_students_of(coach_id).await?;
        Ok(students.into_iter().map(UserDto::from).collect())
    }

    pub async fn list_coaches(&self, status: ApprovalStatus) -> AppResult<Vec<UserDto>> {
        let coaches = self
            .repository
            .list_by_role(UserRole::Coach, Some(status))
            .await?;
        Ok(coaches.into_iter().map(UserDto::from).collect())
    }

    pub async fn review_coach(&self, request: ReviewCoachRequest) -> AppResult<ReviewCoachResponse> {
        request.validate()?;

        let mut coach = self.get_user(&request.user_id).await?;
        coach.decide(request.status, request.rejection_reason)?;

        let coach = self.repository.update(coach).await?;
        log::info!("Coach {} is now {}", coach.id, coach.status.as_str());

        Ok(ReviewCoachResponse {
            message: format!("Coach {}", coach.status.as_str().to_lowercase()),
            user: UserDto::from(coach),
        })
    }

    /// Creates the configured super admin when no account uses that email.
    pub async fn ensure_super_admin(&self, email: &str, password: &SecretString) -> AppResult<()> {
        let email = normalize_email(email);

        if let Some(existing) = self.repository.find_by_email(&email).await? {
            if existing.role != UserRole::SuperAdmin {
                log::warn!(
                    "Super admin email {} belongs to a {} account",
                    email,
                    existing.role.as_str()
                );
            }
            return Ok(());
        }

        let password_hash = hash_password(password.expose_secret())?;
        let admin = User::new("Super Admin", &email, &password_hash, UserRole::SuperAdmin, None);
        self.repository.create(admin).await?;

        log::info!("Created super admin account {}", email);
        Ok(())
    }
}
