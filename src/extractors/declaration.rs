use serde::{Deserialize, Serialize};

use crate::forest::ast::ObjKind;

/// A top-level Go declaration
///
/// Zero-valued fields are left out of the JSON rendering, so a free function has no
/// `receiver` key and `children` never appears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Declared name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub label: String,
    /// Canonical receiver type name; empty for anything but methods
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub receiver: String,
    /// `func`, `type`, `var` or `const`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ObjKind>,
    /// File key the declaration came from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    /// 1-based line of the declaration
    #[serde(default, skip_serializing_if = "is_zero")]
    pub line: usize,
    /// Never populated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Declaration>,
}

fn is_zero(line: &usize) -> bool {
    *line == 0
}
