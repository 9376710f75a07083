use super::domain::{Caller, Permission};
use super::errors::AccessError;

/// Stateless permission check.
///
/// Returns the caller back when every permission in `required` is held, so
/// handlers can chain `authorize(..)?.id`. The first missing permission is
/// reported.
///
/// # Examples
/// ```
/// use service::access::{authorize, Caller, Permission};
/// let admin = Caller::new(1, "Ada Admin").with_permissions([Permission::CommentShow]);
/// assert!(authorize(Some(&admin), &[Permission::CommentShow]).is_ok());
/// assert!(authorize(Some(&admin), &[Permission::CommentDelete]).is_err());
/// assert!(authorize(None, &[]).is_err());
/// ```
pub fn authorize<'a>(caller: Option<&'a Caller>, required: &[Permission]) -> Result<&'a Caller, AccessError> {
    let caller = caller.ok_or(AccessError::Unauthenticated)?;
    match required.iter().find(|p| !caller.has(**p)) {
        Some(missing) => Err(AccessError::Forbidden(*missing)),
        None => Ok(caller),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_requirement_only_needs_a_caller() {
        let c = Caller::new(7, "Reader");
        assert_eq!(authorize(Some(&c), &[]).unwrap().id, 7);
        assert!(matches!(authorize(None, &[]), Err(AccessError::Unauthenticated)));
    }

    #[test]
    fn reports_first_missing_permission() {
        let c = Caller::new(1, "Editor").with_permissions([Permission::CommentEdit]);
        let err = authorize(Some(&c), &[Permission::CommentEdit, Permission::CommentDelete, Permission::CommentShow])
            .unwrap_err();
        assert!(matches!(err, AccessError::Forbidden(Permission::CommentDelete)));
        assert_eq!(err.code(), "PERMISSION_DENIED");
    }

    #[test]
    fn all_permissions_held() {
        let c = Caller::new(1, "Admin").with_permissions(Permission::ALL);
        assert!(authorize(Some(&c), &Permission::ALL).is_ok());
    }
}
