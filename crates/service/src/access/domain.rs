use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AccessError;

/// Named capability stored in `user_permission.permission`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "comment show")]
    CommentShow,
    #[serde(rename = "comment edit")]
    CommentEdit,
    #[serde(rename = "comment create")]
    CommentCreate,
    #[serde(rename = "comment delete")]
    CommentDelete,
}

impl Permission {
    pub const ALL: [Permission; 4] =
        [Permission::CommentShow, Permission::CommentEdit, Permission::CommentCreate, Permission::CommentDelete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CommentShow => "comment show",
            Permission::CommentEdit => "comment edit",
            Permission::CommentCreate => "comment create",
            Permission::CommentDelete => "comment delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Permission {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AccessError::UnknownPermission(s.to_string()))
    }
}

/// Authenticated user resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: i32,
    pub name: String,
    pub permissions: BTreeSet<Permission>,
}

impl Caller {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), permissions: BTreeSet::new() }
    }

    pub fn with_permissions(mut self, perms: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(perms);
        self
    }

    pub fn has(&self, permission: Permission) -> bool { self.permissions.contains(&permission) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_strings_roundtrip() {
        for p in Permission::ALL {
            assert_eq!(p.as_str().parse::<Permission>().unwrap(), p);
        }
        assert_eq!(" Comment Show ".parse::<Permission>().unwrap(), Permission::CommentShow);
    }

    #[test]
    fn unknown_permission_rejected() {
        let err = "user delete".parse::<Permission>().unwrap_err();
        assert!(matches!(err, AccessError::UnknownPermission(ref s) if s == "user delete"));
    }

    #[test]
    fn serde_uses_storage_names() {
        let v = serde_json::to_value(Permission::CommentEdit).unwrap();
        assert_eq!(v, serde_json::json!("comment edit"));
    }
}
