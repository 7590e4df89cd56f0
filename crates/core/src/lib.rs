#![forbid(unsafe_code)]

pub mod model;

pub mod ids {
    /// Identifier of the signed-in user that owns a set of records.
    /// Assigned by the auth provider; opaque to this crate.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct UserId(String);

    impl UserId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, UserIdError> {
            let value = value.into();
            if value.trim().is_empty() {
                return Err(UserIdError::Empty);
            }
            if value.len() > 128 {
                return Err(UserIdError::TooLong);
            }
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum UserIdError {
        Empty,
        TooLong,
    }

    impl std::fmt::Display for UserIdError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Empty => write!(f, "user id must not be empty"),
                Self::TooLong => write!(f, "user id must be at most 128 bytes"),
            }
        }
    }

    impl std::error::Error for UserIdError {}
}

pub mod session {
    use crate::ids::UserId;

    /// Signed-in principal as reported by the auth provider.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct User {
        pub id: UserId,
        pub email: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Session {
        pub user: User,
    }

    impl Session {
        pub fn user_id(&self) -> &UserId {
            &self.user.id
        }
    }
}
