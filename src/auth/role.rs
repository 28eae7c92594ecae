//! Role gate: fail-closed authorization checks on the caller's role

use crate::auth::AuthUser;
use crate::error::AppError;

/// Required for user administration and role reassignment
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Administrator role required"))
    }
}

/// Required for viewing and adjusting WIP limits
pub fn require_curator(user: &AuthUser) -> Result<(), AppError> {
    if user.role.is_curator_or_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Curator or administrator role required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::error::ErrorCode;

    fn user_with_role(role: UserRole) -> AuthUser {
        AuthUser {
            id: 1,
            username: "someone".to_string(),
            role,
        }
    }

    #[test]
    fn test_admin_gate() {
        assert!(require_admin(&user_with_role(UserRole::Admin)).is_ok());
        let err = require_admin(&user_with_role(UserRole::Curator)).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
        assert!(require_admin(&user_with_role(UserRole::User)).is_err());
    }

    #[test]
    fn test_curator_gate() {
        assert!(require_curator(&user_with_role(UserRole::Admin)).is_ok());
        assert!(require_curator(&user_with_role(UserRole::Curator)).is_ok());
        let err = require_curator(&user_with_role(UserRole::User)).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
