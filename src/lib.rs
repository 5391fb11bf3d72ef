//! axiom - layered application config and SSM parameters for AWS projects.
//!
//! This crate provides functionality to:
//! - Discover `.axiom.*` config files and merge base, environment and override layers
//! - Resolve AWS credentials with cached, MFA-aware role assumption
//! - Read and write SSM Parameter Store values under the configured base path
//!
//! # Example
//!
//! ```no_run
//! use axiom::{CredentialProvider, LoadConfigInput, load_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(&LoadConfigInput::new().env("dev"))?;
//!     let creds = CredentialProvider::from_env()?
//!         .resolve_for(config.aws())
//!         .await?;
//!
//!     println!("{} ({}) as {}", config.name(), config.env(), creds.access_key_id);
//!     println!("db url at {}", config.as_parameter_path("db/url"));
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod ssm;
pub mod utils;

// Re-export commonly used types at the crate root
pub use cache::{CacheStore, FileCache};
pub use config::{Config, LoadConfigInput, load_config};
pub use credentials::{CredentialProvider, CredentialSet};
pub use error::{AxiomError, Result};
