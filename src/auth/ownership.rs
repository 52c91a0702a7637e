//! Owner-only access to user resources.
//!
//! Every user resource has exactly one owner and there is no shared access,
//! so a single predicate covers all of them. Lookups report a missing
//! resource before an ownership mismatch.

use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};

pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

pub fn ensure_owner<R: Owned + ?Sized>(resource: &R, user_id: Uuid) -> AppResult<()> {
    if resource.owner_id() == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Resolves a lookup result to a resource the user may act on.
pub fn owned_or_not_found<R: Owned>(resource: Option<R>, user: &AuthUser, what: &str) -> AppResult<R> {
    let resource = resource.ok_or_else(|| AppError::NotFound(format!("{} not found", what)))?;
    ensure_owner(&resource, user.id)?;
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Note {
        owner: Uuid,
    }

    impl Owned for Note {
        fn owner_id(&self) -> Uuid {
            self.owner
        }
    }

    fn user(id: Uuid) -> AuthUser {
        AuthUser { id, email: None }
    }

    #[test]
    fn test_owner_passes() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(&Note { owner }, owner).is_ok());
    }

    #[test]
    fn test_other_user_forbidden() {
        let note = Note { owner: Uuid::new_v4() };
        assert!(matches!(ensure_owner(&note, Uuid::new_v4()), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_missing_resource_is_not_found_before_ownership() {
        let result = owned_or_not_found::<Note>(None, &user(Uuid::new_v4()), "Habit");
        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Habit not found"),
            other => panic!("expected NotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_found_but_foreign_is_forbidden() {
        let note = Note { owner: Uuid::new_v4() };
        let result = owned_or_not_found(Some(note), &user(Uuid::new_v4()), "Habit");
        assert!(matches!(result, Err(AppError::Forbidden)));
    }
}
