//! Application user and the entitlements attached to its type.
//!
//! A user is created the first time an email signs in successfully and is
//! looked up by email afterwards. Nothing in the sign-in flow mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use xyz_chat_core::UserId;

/// Classification of a user that determines entitlements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Every account that signs in through a supported provider.
    #[default]
    Regular,
}

impl UserType {
    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
        }
    }

    /// Returns the limits that apply to users of this type.
    #[must_use]
    pub const fn entitlements(&self) -> Entitlements {
        match self {
            Self::Regular => Entitlements {
                max_messages_per_day: 250,
            },
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Self::Regular),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

/// Per-type usage limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlements {
    /// Messages a user may send per day.
    pub max_messages_per_day: u32,
}

/// An application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    user_type: UserType,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new regular user for the given email with a generated ID.
    #[must_use]
    pub fn new(email: String) -> Self {
        Self {
            id: UserId::new(),
            email,
            user_type: UserType::Regular,
            created_at: Utc::now(),
        }
    }

    /// Creates a user with all fields specified.
    ///
    /// Use this when reconstituting a user from storage.
    #[must_use]
    pub fn with_all_fields(
        id: UserId,
        email: String,
        user_type: UserType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            user_type,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
