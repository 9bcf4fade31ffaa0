//! Source forest provider
//!
//! Parses every `.go` file of one directory into an owned [`ast::File`], keyed by
//! the directory path joined with the file name. Files are independent: a file that
//! cannot be read or parsed is reported in [`ParsedDir::errors`] and left out of the
//! forest, and the remaining files are still parsed.

pub mod ast;
mod error;
mod lowering;

pub use error::ParseError;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use tree_sitter::Parser;

use crate::config::ScanConfig;
use crate::language::{get_tree_sitter_language, is_go_source, is_go_test_source};
use lowering::Lowerer;

/// Parsed files of one directory, iterated in file-key order
pub type Forest = BTreeMap<String, ast::File>;

/// Result of scanning a directory
#[derive(Debug, Default)]
pub struct ParsedDir {
    pub forest: Forest,
    pub errors: Vec<ParseError>,
}

/// Reusable Go parser
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&get_tree_sitter_language())?;
        Ok(Self { parser })
    }

    /// Parse one file's source text
    pub fn parse_source(&mut self, file_key: &str, source: &str) -> Result<ast::File, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::syntax(file_key, 1, "parser produced no tree"))?;

        Lowerer::new(file_key, source).lower_file(tree.root_node())
    }
}

/// Parse one file's source text with a fresh parser
pub fn parse_source(file_key: &str, source: &str) -> Result<ast::File, ParseError> {
    GoParser::new()?.parse_source(file_key, source)
}

/// Parse every Go file directly inside `dir`
pub fn parse_dir(dir: &Path, config: &ScanConfig) -> ParsedDir {
    let mut parsed = ParsedDir::default();

    let files = match list_go_files(dir, config) {
        Ok(files) => files,
        Err(e) => {
            debug!("Skipping directory '{}': {}", dir.display(), e);
            parsed.errors.push(e);
            return parsed;
        }
    };

    let mut parser = match GoParser::new() {
        Ok(parser) => parser,
        Err(e) => {
            parsed.errors.push(e);
            return parsed;
        }
    };

    for path in files {
        let file_key = path.to_string_lossy().to_string();
        let result = fs::read_to_string(&path)
            .map_err(|source| ParseError::Io {
                path: path.clone(),
                source,
            })
            .and_then(|source| parser.parse_source(&file_key, &source));

        match result {
            Ok(file) => {
                debug!(
                    "Parsed {} declarations from {} (package {})",
                    file.decls.len(),
                    file_key,
                    file.package.name
                );
                parsed.forest.insert(file_key, file);
            }
            Err(e) => {
                debug!("Failed to parse {}: {}", file_key, e);
                parsed.errors.push(e);
            }
        }
    }

    parsed
}

/// List regular `.go` files directly inside `dir`, sorted by name
fn list_go_files(dir: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ParseError> {
    let metadata = fs::metadata(dir).map_err(|source| ParseError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ParseError::ReadDir {
            dir: dir.to_path_buf(),
            source: std::io::Error::other("not a directory"),
        });
    }

    let pattern = format!(
        "{}/*{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        crate::language::GO_SOURCE_SUFFIX
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ParseError::Io {
                path,
                source: e.into(),
            }
        })?;

        if !path.is_file() || !is_go_source(&path) {
            continue;
        }
        if config.skip_tests && is_go_test_source(&path) {
            debug!("Skipping test file {}", path.display());
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}
