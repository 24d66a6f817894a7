//! Shared types used across server functions and UI components.

/// Signed-in user info for display in the UI.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionView {
    pub user_id: String,
    pub user_type: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub max_messages_per_day: u32,
}

/// What the login page shows.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginOptions {
    /// Domain named in the subtitle and the access-denied toast.
    pub allowed_domain: String,
    /// Shows the test sign-in control.
    pub test_mode: bool,
    /// Email the test sign-in control posts.
    pub test_email: String,
}

/// A file attached to the message being composed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub content_type: String,
}
