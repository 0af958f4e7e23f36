//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A persisted user record.
///
/// The `id` is assigned by the store when the row is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// The fields needed to insert a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Creates a new insert payload.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Attaches the store-assigned id, producing the persisted record.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_into_user() {
        let user = NewUser::new("Ada", "ada@example.com").into_user(UserId::new(1));
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }
}
