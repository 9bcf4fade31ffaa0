//! Owned Go syntax tree
//!
//! A closed model of the parts of a Go file the extractor looks at. Everything
//! below a top-level declaration that does not affect naming (bodies, parameter
//! lists, initializers) is dropped during lowering.

use serde::{Deserialize, Serialize};

/// Kind of object a declared name denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjKind {
    Const,
    Type,
    Var,
    Func,
}

impl ObjKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjKind::Const => "const",
            ObjKind::Type => "type",
            ObjKind::Var => "var",
            ObjKind::Func => "func",
        }
    }
}

impl std::fmt::Display for ObjKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named token with its 1-based line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub line: usize,
    /// Object kind annotation; `None` when the provider could not resolve one
    pub obj: Option<ObjKind>,
}

impl Ident {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
            obj: None,
        }
    }

    pub fn with_obj(mut self, obj: ObjKind) -> Self {
        self.obj = Some(obj);
        self
    }
}

/// Type expression
///
/// Pointer and array layers nest through `Box`; rendering and dropping walk those
/// layers in a loop so arbitrarily long `*[]*...` chains never grow the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Plain type name (`Widget`, `int`)
    Ident(String),
    /// `*X`
    Star(Box<Expr>),
    /// `[N]Elt`, or `[]Elt` when `len` is `None`
    Array { len: Option<String>, elt: Box<Expr> },
    /// `X.Sel`
    Selector { x: String, sel: String },
    /// Inline `struct { ... }`, as written
    Struct(String),
    /// Inline `interface { ... }`, as written
    Interface(String),
    /// `map[Key]Value`
    Map { key: Box<Expr>, value: Box<Expr> },
    /// Any other type form (generic instantiation, chan, func, parenthesized), as written
    Other(String),
}

impl Expr {
    /// Render the expression as Go source text
    pub fn source(&self) -> String {
        let mut out = String::new();
        let mut expr = self;
        loop {
            match expr {
                Expr::Star(x) => {
                    out.push('*');
                    expr = &**x;
                }
                Expr::Array { len, elt } => {
                    out.push('[');
                    out.push_str(len.as_deref().unwrap_or(""));
                    out.push(']');
                    expr = &**elt;
                }
                Expr::Ident(name) => {
                    out.push_str(name);
                    return out;
                }
                Expr::Selector { x, sel } => {
                    out.push_str(x);
                    out.push('.');
                    out.push_str(sel);
                    return out;
                }
                Expr::Struct(text) | Expr::Interface(text) | Expr::Other(text) => {
                    out.push_str(text);
                    return out;
                }
                Expr::Map { key, value } => {
                    out.push_str(&format!("map[{}]{}", key.source(), value.source()));
                    return out;
                }
            }
        }
    }

    /// Move boxed sub-expressions out, leaving empty placeholders behind
    fn take_children(&mut self, pending: &mut Vec<Box<Expr>>) {
        let placeholder = || Box::new(Expr::Other(String::new()));
        match self {
            Expr::Star(x) | Expr::Array { elt: x, .. } => {
                pending.push(std::mem::replace(x, placeholder()));
            }
            Expr::Map { key, value } => {
                pending.push(std::mem::replace(key, placeholder()));
                pending.push(std::mem::replace(value, placeholder()));
            }
            Expr::Ident(_)
            | Expr::Selector { .. }
            | Expr::Struct(_)
            | Expr::Interface(_)
            | Expr::Other(_) => {}
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut child) = pending.pop() {
            child.take_children(&mut pending);
        }
    }
}

/// One entry of a receiver list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub ty: Expr,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList {
    pub list: Vec<Field>,
}

/// Names bound by one `var` or `const` spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: Ident,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spec {
    /// Imports bind no top-level names
    Import,
    Value(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenDecl {
    pub specs: Vec<Spec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Receiver list; `None` for free functions
    pub recv: Option<FieldList>,
    /// Line of the `func` keyword
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

/// One parsed source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub package: Ident,
    pub decls: Vec<Decl>,
}
