pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{ApprovedCoach, AuthMiddleware, AuthenticatedUser, CurrentUser};
pub use password::{hash_password, verify_password};
pub use utils::{require_role, require_student, require_super_admin};
