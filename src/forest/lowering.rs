//! Lowering from the tree-sitter concrete tree to the owned Go AST

use tree_sitter::Node;

use super::ast::{
    Decl, Expr, Field, FieldList, File, FuncDecl, GenDecl, Ident, ObjKind, Spec, TypeSpec,
    ValueSpec,
};
use super::error::ParseError;
use crate::language::get_declaration_node_kinds;

/// Nesting limit for type forms that lower recursively (map keys and values).
/// Pointer and array layers are lowered in a loop and do not count.
pub(crate) const MAX_TYPE_NESTING: usize = 500;

/// Pointer or array layer peeled off a type, outermost first
enum Layer {
    Star,
    Array(Option<String>),
}

/// Lowers one tree-sitter tree of one file
pub(crate) struct Lowerer<'a> {
    file: &'a str,
    content: &'a str,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(file: &'a str, content: &'a str) -> Self {
        Self { file, content }
    }

    /// Lower a `source_file` root node
    ///
    /// Enforces the file layout `go/parser` requires: the package clause comes
    /// first, then imports, then every other declaration.
    pub(crate) fn lower_file(&self, root: Node) -> Result<File, ParseError> {
        if root.has_error() {
            let line = first_error_line(root).unwrap_or_else(|| line_of(&root));
            return Err(self.syntax(line, "syntax error"));
        }

        let declaration_kinds = get_declaration_node_kinds();
        let mut package = None;
        let mut imports_closed = false;
        let mut decls = Vec::new();

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            let kind = child.kind();
            if kind == "comment" {
                continue;
            }

            if package.is_none() {
                if kind != "package_clause" {
                    return Err(self.syntax(
                        line_of(&child),
                        format!("expected 'package', found '{}'", leading_token(child)),
                    ));
                }
                let mut clause_cursor = child.walk();
                let name = child
                    .named_children(&mut clause_cursor)
                    .find(|c| c.kind() == "package_identifier")
                    .ok_or_else(|| self.syntax(line_of(&child), "expected package name"))?;
                package = Some(self.ident(name));
                continue;
            }

            match kind {
                "package_clause" => {
                    return Err(self.syntax(
                        line_of(&child),
                        "expected declaration, found 'package'",
                    ));
                }
                "import_declaration" if imports_closed => {
                    return Err(self.syntax(
                        line_of(&child),
                        "imports must appear before other declarations",
                    ));
                }
                _ if declaration_kinds.contains(&kind) => {
                    if kind != "import_declaration" {
                        imports_closed = true;
                    }
                    decls.push(self.lower_decl(child)?);
                }
                _ => {
                    return Err(self.syntax(
                        line_of(&child),
                        "non-declaration statement outside function body",
                    ));
                }
            }
        }

        let package = package
            .ok_or_else(|| self.syntax(line_of(&root), "expected 'package', found 'EOF'"))?;
        Ok(File { package, decls })
    }

    fn lower_decl(&self, node: Node) -> Result<Decl, ParseError> {
        match node.kind() {
            "function_declaration" | "method_declaration" => self.lower_func(node).map(Decl::Func),
            _ => self.lower_gen(node).map(Decl::Gen),
        }
    }

    fn lower_func(&self, node: Node) -> Result<FuncDecl, ParseError> {
        let name = self.ident(self.field(node, "name")?).with_obj(ObjKind::Func);
        let recv = match node.child_by_field_name("receiver") {
            Some(receiver) => Some(self.lower_field_list(receiver)?),
            None => None,
        };

        Ok(FuncDecl {
            name,
            recv,
            line: line_of(&node),
        })
    }

    fn lower_field_list(&self, node: Node) -> Result<FieldList, ParseError> {
        let mut list = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if matches!(
                child.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            ) {
                let ty = self.lower_type(self.field(child, "type")?, 0)?;
                list.push(Field { ty });
            }
        }
        Ok(FieldList { list })
    }

    /// Lower a grouped declaration; specs may sit directly under the node or inside a
    /// `*_spec_list` wrapper depending on the grammar version
    fn lower_gen(&self, node: Node) -> Result<GenDecl, ParseError> {
        let mut specs = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec_list" | "var_spec_list" | "const_spec_list" => {
                    let mut nested_cursor = child.walk();
                    for nested in child.named_children(&mut nested_cursor) {
                        specs.extend(self.lower_spec(nested)?);
                    }
                }
                _ => specs.extend(self.lower_spec(child)?),
            }
        }

        Ok(GenDecl { specs })
    }

    fn lower_spec(&self, node: Node) -> Result<Option<Spec>, ParseError> {
        let spec = match node.kind() {
            "import_spec" => Spec::Import,
            "var_spec" | "const_spec" => {
                let obj = if node.kind() == "const_spec" {
                    ObjKind::Const
                } else {
                    ObjKind::Var
                };
                let mut cursor = node.walk();
                let names = node
                    .children_by_field_name("name", &mut cursor)
                    .filter(|name| name.kind() == "identifier")
                    .map(|name| self.ident(name).with_obj(obj))
                    .collect();
                Spec::Value(ValueSpec { names })
            }
            "type_spec" | "type_alias" => {
                let name = self.field(node, "name")?;
                Spec::Type(TypeSpec {
                    name: self.ident(name).with_obj(ObjKind::Type),
                    line: line_of(&name),
                })
            }
            _ => return Ok(None),
        };
        Ok(Some(spec))
    }

    /// Lower a type node. Pointer and array wrappers are peeled in a loop and
    /// rebuilt inside-out, so their count is unbounded; map keys and values recurse
    /// and are limited to [`MAX_TYPE_NESTING`] levels.
    fn lower_type(&self, node: Node, depth: usize) -> Result<Expr, ParseError> {
        if depth > MAX_TYPE_NESTING {
            return Err(self.syntax(line_of(&node), "exceeded max nesting depth"));
        }

        let mut layers = Vec::new();
        let mut node = node;
        loop {
            match node.kind() {
                "pointer_type" => {
                    layers.push(Layer::Star);
                    let mut cursor = node.walk();
                    let pointee = node
                        .named_children(&mut cursor)
                        .find(|child| child.kind() != "comment");
                    node = pointee.ok_or_else(|| self.syntax(line_of(&node), "expected type"))?;
                }
                "slice_type" => {
                    layers.push(Layer::Array(None));
                    node = self.field(node, "element")?;
                }
                "array_type" => {
                    let len = node
                        .child_by_field_name("length")
                        .map(|len| self.get_node_text(len));
                    layers.push(Layer::Array(len));
                    node = self.field(node, "element")?;
                }
                _ => break,
            }
        }

        let mut expr = match node.kind() {
            "type_identifier" | "identifier" => Expr::Ident(self.get_node_text(node)),
            "qualified_type" => Expr::Selector {
                x: self.get_node_text(self.field(node, "package")?),
                sel: self.get_node_text(self.field(node, "name")?),
            },
            "struct_type" => Expr::Struct(self.get_node_text(node)),
            "interface_type" => Expr::Interface(self.get_node_text(node)),
            "map_type" => Expr::Map {
                key: Box::new(self.lower_type(self.field(node, "key")?, depth + 1)?),
                value: Box::new(self.lower_type(self.field(node, "value")?, depth + 1)?),
            },
            _ => Expr::Other(self.get_node_text(node)),
        };

        while let Some(layer) = layers.pop() {
            expr = match layer {
                Layer::Star => Expr::Star(Box::new(expr)),
                Layer::Array(len) => Expr::Array {
                    len,
                    elt: Box::new(expr),
                },
            };
        }
        Ok(expr)
    }

    /// Required child by field name
    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ParseError> {
        node.child_by_field_name(name).ok_or_else(|| {
            self.syntax(
                line_of(&node),
                format!("expected {} in {}", name, node.kind()),
            )
        })
    }

    fn ident(&self, node: Node) -> Ident {
        Ident::new(self.get_node_text(node), line_of(&node))
    }

    fn syntax(&self, line: usize, message: impl Into<String>) -> ParseError {
        ParseError::syntax(self.file, line, message)
    }

    /// Get node text, respecting UTF-8 boundaries
    fn get_node_text(&self, node: Node) -> String {
        let content_bytes = self.content.as_bytes();
        let (start_byte, end_byte) = (node.start_byte(), node.end_byte());
        if start_byte <= end_byte && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }
}

/// 1-based line of a node's start position
fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Kind of the first token of a node (`func`, `var`, ...)
fn leading_token(node: Node) -> &'static str {
    let mut current = node;
    while let Some(first) = current.child(0) {
        current = first;
    }
    current.kind()
}

/// Line of the first ERROR or MISSING node below `root`, in document order
fn first_error_line(root: Node) -> Option<usize> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(line_of(&node));
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
