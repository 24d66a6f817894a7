//! Core domain types and utilities for the xyz-chat platform.
//!
//! This crate provides the foundational types, error handling, and shared
//! utilities used by both the server and the hydrated browser bundle.

pub mod error;
pub mod file_type;
pub mod id;

pub use error::Result;
pub use file_type::{FileCategory, accept_string, classify};
pub use id::{ParseIdError, UserId};
