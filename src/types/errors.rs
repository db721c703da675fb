use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the acquisition pipeline. Component failures propagate
/// to the orchestrator unchanged in kind; acquisition is all-or-nothing.
#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported file type: {0}. Only .json and .vsix files are supported.")]
    UnsupportedInput(String),

    #[error("Failed to extract package: {0}")]
    Extraction(String),

    #[error("Failed to read extension manifest: {0}")]
    ManifestNotFound(String),

    #[error("No theme file found in the extension")]
    NoThemeFound,

    #[error("Failed to parse theme file: {0}")]
    ThemeParse(String),

    #[error("Failed to render report: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AcquireResult<T> = Result<T, AcquireError>;
