// godecls - tree-sitter powered listing of top-level Go declarations
//
// Architecture: directory → forest (one owned AST per .go file) → declarations → JSON.
// Parsing failures are per file and never abort the scan.

pub mod config;
pub mod extractors;
pub mod forest;
pub mod language;

use std::path::Path;

pub use config::ScanConfig;
pub use extractors::{extract_declarations, resolve_receiver, Declaration};
pub use forest::{parse_dir, parse_source, Forest, ParseError, ParsedDir};

/// Outcome of scanning one directory
#[derive(Debug, Default)]
pub struct Scan {
    pub declarations: Vec<Declaration>,
    /// Files (or the directory) that could not be parsed
    pub errors: Vec<ParseError>,
}

/// Parse every Go file in `dir` and extract its top-level declarations
pub fn scan_dir(dir: &Path, config: &ScanConfig) -> Scan {
    let ParsedDir { forest, errors } = parse_dir(dir, config);
    let declarations = extract_declarations(&forest);

    tracing::debug!(
        "Extracted {} declarations from {} files in {} ({} failed)",
        declarations.len(),
        forest.len(),
        dir.display(),
        errors.len()
    );

    Scan {
        declarations,
        errors,
    }
}

/// Write declarations as one compact JSON array followed by a newline
pub fn write_json<W: std::io::Write>(
    mut writer: W,
    declarations: &[Declaration],
) -> serde_json::Result<()> {
    serde_json::to_writer(&mut writer, declarations)?;
    writer.write_all(b"\n").map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_dir_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(
            dir.join("widget.go"),
            "package w\n\ntype Widget struct{}\n\nfunc (w *Widget) Render() {}\n",
        )
        .unwrap();

        let scan = scan_dir(dir, &ScanConfig::default());

        assert!(scan.errors.is_empty());
        assert_eq!(scan.declarations.len(), 2);
        assert_eq!(scan.declarations[1].receiver, "Widget");
    }

    #[test]
    fn test_empty_directory_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let scan = scan_dir(temp_dir.path(), &ScanConfig::default());

        let mut out = Vec::new();
        write_json(&mut out, &scan.declarations).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }

    #[test]
    fn test_unparseable_directory_writes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("broken.go"), "package p\n\nfunc (\n").unwrap();

        let scan = scan_dir(temp_dir.path(), &ScanConfig::default());

        let mut out = Vec::new();
        write_json(&mut out, &scan.declarations).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
        assert_eq!(scan.errors.len(), 1);
    }
}
