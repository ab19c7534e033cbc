use thiserror::Error;

/// Failures raised by the inquiry engine.
///
/// User-driven outcomes (going back, dismissing a prompt) are not errors;
/// they travel through [`crate::inquiry::PromptOutcome`] and
/// [`crate::inquiry::Navigation`]. Only host I/O failures and misuse of the
/// engine by step authors end up here.
#[derive(Debug, Error)]
pub enum InquiryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt `{0}` was accepted without an active or selected item")]
    EmptySelection(String),
    #[error("Step `{key}` resolved a {found} prompt but was declared as {expected}")]
    KindMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Scripted prompt error: {0}")]
    Script(String),
}

/// Errors surfaced while loading or saving the composer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Failures of a full commit-composition run.
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Inquiry(#[from] InquiryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
