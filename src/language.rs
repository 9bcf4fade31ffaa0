//! Language Support - tree-sitter configuration for Go sources
//!
//! ALL tree-sitter language configuration lives here so the forest provider and
//! the tests agree on which grammar is in use.

use std::path::Path;

/// File suffix that marks a Go source file
pub const GO_SOURCE_SUFFIX: &str = ".go";

/// File suffix that marks a Go test file
pub const GO_TEST_SUFFIX: &str = "_test.go";

/// Get the tree-sitter language for Go
pub fn get_tree_sitter_language() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Check whether a path names a Go source file (by suffix only, like `go/parser`)
pub fn is_go_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(GO_SOURCE_SUFFIX))
}

/// Check whether a path names a Go test file
pub fn is_go_test_source(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(GO_TEST_SUFFIX))
}

/// Top-level node kinds that introduce a declaration in the Go grammar
pub fn get_declaration_node_kinds() -> Vec<&'static str> {
    vec![
        "function_declaration",
        "method_declaration",
        "import_declaration",
        "const_declaration",
        "type_declaration",
        "var_declaration",
    ]
}
