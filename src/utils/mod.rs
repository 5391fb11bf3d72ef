//! Utility functions shared across the application.

pub(crate) mod permissions;
mod prompt;

pub use permissions::restrict_file_permissions;
pub use prompt::{confirm, prompt};
