//! Session projection.
//!
//! The session is never stored. It is derived from a verified
//! [`SessionToken`] on every read, so reading it never touches the user
//! store.

use crate::token::SessionToken;
use crate::user::UserType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xyz_chat_core::UserId;

/// The user as seen by downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Projects the session from a verified token.
    #[must_use]
    pub fn from_token(token: &SessionToken) -> Self {
        Self {
            user: SessionUser {
                id: token.user_id(),
                user_type: token.user_type(),
                email: token.email().map(str::to_string),
                name: token.name().map(str::to_string),
                image: token.picture().map(str::to_string),
            },
            expires: token.expires_at().unwrap_or_else(Utc::now),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user.user_type
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token() -> SessionToken {
        SessionToken::new(
            "google-123".to_string(),
            UserId::new(),
            UserType::Regular,
            Some("alice@xyz.vc".to_string()),
            Some("Alice".to_string()),
            Some("https://example.com/alice.png".to_string()),
            Utc::now(),
            Duration::hours(1),
        )
    }

    #[test]
    fn projects_identity_and_type() {
        let token = token();
        let session = Session::from_token(&token);

        assert_eq!(session.user_id(), token.user_id());
        assert_eq!(session.user_type(), UserType::Regular);
        assert_eq!(session.user.email.as_deref(), Some("alice@xyz.vc"));
        assert_eq!(session.user.name.as_deref(), Some("Alice"));
        assert_eq!(
            session.user.image.as_deref(),
            Some("https://example.com/alice.png")
        );
        assert!(!session.is_expired());
    }

    #[test]
    fn wire_shape() {
        let session = Session::from_token(&token());
        let json = serde_json::to_value(&session).expect("json");

        assert_eq!(json["user"]["type"], "regular");
        assert!(json["user"]["id"].is_string());
        assert!(json["expires"].is_string());
    }
}
