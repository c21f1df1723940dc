use std::process::ExitCode as StdExitCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidInput = 10,
    IoError = 12,
    UnsupportedCodec = 13,
    MissingDependency = 14,
}

impl From<ExitCode> for StdExitCode {
    fn from(code: ExitCode) -> Self {
        StdExitCode::from(code as u8)
    }
}

/// Rejections raised by the shortcut table when an edit cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("row {row} out of range ({rows} visible rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("column '{column}' is not editable")]
    NotEditable { column: &'static str },

    #[error("no editor is open")]
    NoEditor,

    #[error("no visible shortcut with id '{id}'")]
    UnknownId { id: String },
}

#[derive(Debug, Error)]
pub enum DecoderError {
    #[error("invalid format in {codec}{}: {message}", .line.map(|l| format!(" (line {})", l)).unwrap_or_default())]
    InvalidFormat {
        codec: String,
        line: Option<usize>,
        message: String,
    },

    #[error("{codec} requires missing dependency '{dependency}'")]
    MissingDependency { codec: String, dependency: String },

    #[error("unsupported codec: {name}")]
    UnsupportedCodec { name: String },

    #[error("ambiguous codec name '{name}', qualify it with one of: {}", .candidates.join(", "))]
    AmbiguousCodec { name: String, candidates: Vec<String> },

    #[error("shortcut table: {0}")]
    Table(#[from] TableError),

    #[error("invalid shortcut file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecoderError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DecoderError::InvalidFormat { .. }
            | DecoderError::Table(_)
            | DecoderError::Json(_) => ExitCode::InvalidInput,
            DecoderError::MissingDependency { .. } => ExitCode::MissingDependency,
            DecoderError::UnsupportedCodec { .. } | DecoderError::AmbiguousCodec { .. } => {
                ExitCode::UnsupportedCodec
            }
            DecoderError::Io(_) => ExitCode::IoError,
        }
    }

    pub fn invalid_format(codec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            codec: codec.into(),
            line: None,
            message: message.into(),
        }
    }

    pub fn invalid_line(codec: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            codec: codec.into(),
            line: Some(line),
            message: message.into(),
        }
    }

    pub fn missing_dependency(codec: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self::MissingDependency {
            codec: codec.into(),
            dependency: dependency.into(),
        }
    }

    pub fn unsupported_codec(name: impl Into<String>) -> Self {
        Self::UnsupportedCodec { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, DecoderError>;
