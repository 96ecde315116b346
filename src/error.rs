use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("{name}:{line} malformed tag")]
    MalformedTag { name: String, line: usize },
    #[error("{name}:{line} unrecognized tag")]
    UnrecognizedTag { name: String, line: usize },
    #[error("{name}:{line} incomplete tag")]
    IncompleteTag { name: String, line: usize },
    #[error("{name}:{line} unmatched tag {tag:?}, expected {expected:?}")]
    UnmatchedTag {
        name: String,
        line: usize,
        tag: String,
        expected: String,
    },
    #[error("{name}:{line} unopened scope {tag:?}")]
    UnopenedScope {
        name: String,
        line: usize,
        tag: String,
    },
    #[error("{name}:{line} unclosed scope {tag:?}")]
    UnclosedScope {
        name: String,
        line: usize,
        tag: String,
    },
    #[error("{name}:{line} depth limit {limit}")]
    DepthLimitExceeded {
        name: String,
        line: usize,
        limit: usize,
    },
    #[error("template {0:?} not found")]
    TemplateNotFound(String),
    #[error("include depth limit {limit} exceeded including {name:?}")]
    IncludeDepthExceeded { name: String, limit: usize },
    #[error("Write Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("Decode Error: {0}")]
    DecodeError(String),
    #[error("Template Load Error: {0}")]
    LoadError(String),
}

impl TemplateError {
    /// Line the error was reported on, for parse-time errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            TemplateError::MalformedTag { line, .. }
            | TemplateError::UnrecognizedTag { line, .. }
            | TemplateError::IncompleteTag { line, .. }
            | TemplateError::UnmatchedTag { line, .. }
            | TemplateError::UnopenedScope { line, .. }
            | TemplateError::UnclosedScope { line, .. }
            | TemplateError::DepthLimitExceeded { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl serde::ser::Error for TemplateError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        TemplateError::SerializationError(msg.to_string())
    }
}

impl serde::de::Error for TemplateError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        TemplateError::SerializationError(msg.to_string())
    }
}
