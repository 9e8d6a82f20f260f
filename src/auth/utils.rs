use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::UserRole,
};

pub fn require_role(claims: &Claims, role: UserRole) -> AppResult<()> {
    if claims.role != role {
        log::warn!(
            "User {} with role {} attempted a {} action",
            claims.sub,
            claims.role.as_str(),
            role.as_str()
        );
        return Err(AppError::Forbidden(format!(
            "Only {} users can perform this action",
            role.as_str()
        )));
    }
    Ok(())
}

pub fn require_super_admin(claims: &Claims) -> AppResult<()> {
    require_role(claims, UserRole::SuperAdmin)
}

pub fn require_student(claims: &Claims) -> AppResult<()> {
    require_role(claims, UserRole::Student)
}
