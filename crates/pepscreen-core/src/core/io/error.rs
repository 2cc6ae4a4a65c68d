use thiserror::Error;

/// Failures of the file adapters. Every variant names the file involved.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error for file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in file '{path}': {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("Parse error in file '{path}': {message}")]
    Parse { path: String, message: String },
}

impl IoError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn parse(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
