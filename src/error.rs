//! Unified error type for axiom.
//!
//! All public APIs return `Result<T, AxiomError>`. Config and credential
//! resolution are all-or-nothing: every variant here is fatal to the
//! operation that produced it and is expected to reach the CLI entry point.

use std::path::PathBuf;

/// The unified error type for all axiom operations.
#[derive(Debug, thiserror::Error)]
pub enum AxiomError {
    // ── I/O & serialization ────────────────────────────────────────────
    /// Filesystem or I/O operation failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Configuration ──────────────────────────────────────────────────
    /// No config file matched any of the patterns in the working
    /// directory or any of its ancestors.
    #[error("Axiom config files not found: {}", .patterns.join(", "))]
    ConfigNotFound { patterns: Vec<String> },

    /// A config file was found but its extension has no loader.
    #[error("unsupported config file type: {}", .0.display())]
    UnsupportedConfigFormat(PathBuf),

    /// Malformed JSON, or a script module that failed to evaluate.
    #[error("failed to load config {}: {message}", .path.display())]
    ConfigLoad { path: PathBuf, message: String },

    /// The merged configuration is missing required fields or has the wrong shape.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    // ── Credentials & cache ────────────────────────────────────────────
    /// Role assumption produced unusable credentials.
    #[error("credential resolution failed: {0}")]
    CredentialResolution(String),

    /// `delete` was asked to remove a cache entry that does not exist.
    #[error("cache entry '{0}' does not exist")]
    CacheEntryNotFound(String),

    // ── AWS ────────────────────────────────────────────────────────────
    /// An error returned by an AWS service call.
    #[error("{service}: {message}")]
    Aws { service: String, message: String },

    // ── Lookup & user interaction ──────────────────────────────────────
    /// A requested parameter or resource was not found.
    #[error("{0}")]
    NotFound(String),

    /// User input validation failed.
    #[error("{0}")]
    Validation(String),

    // ── Catch-all ──────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

// ── Convenience constructors ───────────────────────────────────────────

impl AxiomError {
    pub fn config_load(path: impl Into<PathBuf>, message: impl std::fmt::Display) -> Self {
        AxiomError::ConfigLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        AxiomError::InvalidConfig(message.into())
    }

    pub fn credentials(message: impl Into<String>) -> Self {
        AxiomError::CredentialResolution(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AxiomError::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AxiomError::Validation(message.into())
    }

    /// Create an SSM error, translating common Parameter Store failures
    /// into user-friendly messages.
    pub fn ssm(e: impl std::fmt::Display) -> Self {
        let msg = e.to_string();

        let friendly = if msg.contains("ParameterNotFound") {
            "Parameter not found".to_string()
        } else if msg.contains("ParameterAlreadyExists") {
            "Parameter already exists (use --overwrite)".to_string()
        } else if msg.contains("AccessDeniedException") {
            "Access denied (check IAM permissions)".to_string()
        } else if msg.contains("ExpiredTokenException") {
            "Credentials expired (delete the cached credentials and retry)".to_string()
        } else if msg.contains("InvalidKeyId") {
            "Invalid KMS key for SecureString".to_string()
        } else if msg.contains("ValidationException") {
            "Invalid request".to_string()
        } else if msg.contains("ThrottlingException") {
            "Request throttled (try again later)".to_string()
        } else {
            msg
        };

        AxiomError::Aws {
            service: "ssm".to_string(),
            message: friendly,
        }
    }

    /// Create an STS error for a failed role assumption.
    pub fn sts(e: impl std::fmt::Display) -> Self {
        let msg = e.to_string();

        let friendly = if msg.contains("MultiFactorAuthentication") {
            "MFA code rejected (check the code and try again)".to_string()
        } else if msg.contains("AccessDenied") {
            "Not authorized to assume role (check the trust policy)".to_string()
        } else if msg.contains("ExpiredToken") {
            "Source credentials expired".to_string()
        } else {
            msg
        };

        AxiomError::Aws {
            service: "sts".to_string(),
            message: friendly,
        }
    }
}

/// Convenience type alias for Results using AxiomError.
pub type Result<T> = std::result::Result<T, AxiomError>;
