use std::io::{self, Write};

use crate::error::Result;

/// Supplies the one-time code for an MFA device.
///
/// No format checking happens here; a bad code surfaces as an STS error
/// from the role assumption.
pub trait MfaCodeProvider: Send + Sync {
    fn mfa_code(&self, mfa_serial: &str) -> Result<String>;
}

/// Prompts on the terminal, reading the code without echo.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptMfaCodeProvider;

impl MfaCodeProvider for PromptMfaCodeProvider {
    fn mfa_code(&self, mfa_serial: &str) -> Result<String> {
        eprint!("Enter MFA code for {}: ", mfa_serial);
        io::stderr().flush()?;
        Ok(rpassword::read_password()?)
    }
}

/// Always answers with the same code. Useful for scripted environments and
/// tests.
#[derive(Debug, Clone)]
pub struct StaticMfaCodeProvider(pub String);

impl MfaCodeProvider for StaticMfaCodeProvider {
    fn mfa_code(&self, _mfa_serial: &str) -> Result<String> {
        Ok(self.0.clone())
    }
}
