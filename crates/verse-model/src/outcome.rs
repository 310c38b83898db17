use crate::verse::VerseResult;
use serde::Serialize;
use thiserror::Error;

/// Why a fetch did not produce a verse.
///
/// The `Display` text is the status message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorState {
    #[error("Please type a reference like 'John 3:16'.")]
    EmptyInput,

    #[error("Could not find that reference. Try another.")]
    NotFound,

    #[error("Something went wrong. Please try again.")]
    NetworkFailure,
}

/// Terminal result of one fetch, handed to the renderer exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Verse(VerseResult),
    Failed(ErrorState),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Verse(_))
    }
}

impl From<VerseResult> for Outcome {
    fn from(v: VerseResult) -> Self {
        Outcome::Verse(v)
    }
}

impl From<ErrorState> for Outcome {
    fn from(e: ErrorState) -> Self {
        Outcome::Failed(e)
    }
}
