//! Signed session tokens.
//!
//! A [`SessionToken`] is the claim set stored in the session cookie. It is
//! built only by [`crate::enrichment::TokenEnricher`] and signed with HS256.

use crate::error::AuthenticationError;
use crate::user::UserType;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::fmt;
use xyz_chat_core::UserId;

/// Claims carried by the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Provider subject of the account that signed in.
    sub: String,
    /// Application user ID.
    id: UserId,
    #[serde(rename = "type")]
    user_type: UserType,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

impl SessionToken {
    #[expect(clippy::too_many_arguments)]
    pub(crate) fn new(
        sub: String,
        id: UserId,
        user_type: UserType,
        email: Option<String>,
        name: Option<String>,
        picture: Option<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub,
            id,
            user_type,
            email,
            name,
            picture,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn picture(&self) -> Option<&str> {
        self.picture.as_deref()
    }

    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

impl TokenSigner {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Encodes a token as a compact JWT.
    ///
    /// # Errors
    ///
    /// Returns `TokenIssue` if encoding fails.
    pub fn sign(&self, token: &SessionToken) -> Result<String, Report<AuthenticationError>> {
        encode(&Header::new(Algorithm::HS256), token, &self.encoding).map_err(|e| {
            AuthenticationError::TokenIssue {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Verifies a compact JWT and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenExpired` for an expired token and `InvalidToken` for
    /// any other verification failure.
    pub fn verify(&self, encoded: &str) -> Result<SessionToken, Report<AuthenticationError>> {
        decode::<SessionToken>(encoded, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthenticationError::TokenExpired,
                    _ => AuthenticationError::InvalidToken {
                        reason: e.to_string(),
                    },
                }
                .into()
            })
    }
}
