//! Console helpers shared by the interactive programs.

use crate::application::Console;
use crate::domain::{ChatResponse, DomainError};

pub const QUIT_SENTINEL: &str = "quit";

/// How an input line is compared with [`QUIT_SENTINEL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitMatch {
    /// The raw line must be exactly `quit`.
    Exact,
    /// The trimmed line must equal `quit` ignoring letter case.
    IgnoreCase,
}

impl QuitMatch {
    pub fn matches(&self, input: &str) -> bool {
        match self {
            QuitMatch::Exact => input == QUIT_SENTINEL,
            QuitMatch::IgnoreCase => input.trim().eq_ignore_ascii_case(QUIT_SENTINEL),
        }
    }
}

pub(crate) fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

pub(crate) fn write_full_response(
    console: &mut dyn Console,
    response: &ChatResponse,
) -> Result<(), DomainError> {
    console.write_line(&format!("\nFull response: {}\n\n", response.pretty_json()))?;
    Ok(())
}
