use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn part of a directory into a parsed file.
///
/// Every variant describes one file (or the directory itself); none of them stop
/// the scan of the remaining files.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{}: cannot read directory: {source}", dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    #[error("invalid directory pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("tree-sitter rejected the Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}

impl ParseError {
    pub(crate) fn syntax(file: &str, line: usize, message: impl Into<String>) -> Self {
        ParseError::Syntax {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}
