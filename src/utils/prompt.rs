//! Line-based interactive prompts on stdin.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Prompt with a default shown in brackets; empty input picks the default.
pub fn prompt(message: &str, default: &str) -> Result<String> {
    print!("{} [{}]: ", message, default);
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock(), default)
}

/// y/N confirmation prompt.
pub fn confirm(message: &str) -> Result<bool> {
    print!("{} [y/N]: ", message);
    io::stdout().flush()?;
    Ok(is_yes(&read_answer(&mut io::stdin().lock(), "")?))
}

fn read_answer(input: &mut impl BufRead, default: &str) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(line.to_string())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}
