use crate::forest::ast::{Expr, FieldList};

/// Canonical name of a method's receiver type
///
/// Array and pointer layers are stripped in whatever order they appear, so `*T`,
/// `[]*T` and `*[]T` all resolve to `T`. Qualified names keep their package
/// (`pkg.T`), inline struct and interface types keep their source text, and map
/// types render as `map[K]V`. Free functions (no receiver list) resolve to `""`.
pub fn resolve_receiver(recv: Option<&FieldList>) -> String {
    let Some(field) = recv.and_then(|list| list.list.first()) else {
        return String::new();
    };

    let mut ty = &field.ty;
    loop {
        match ty {
            Expr::Array { elt, .. } => ty = &**elt,
            Expr::Star(x) => ty = &**x,
            Expr::Selector { x, sel } => return format!("{}.{}", x, sel),
            Expr::Struct(text) | Expr::Interface(text) => return text.clone(),
            Expr::Map { key, value } => {
                return format!("map[{}]{}", key.source(), value.source());
            }
            Expr::Ident(_) | Expr::Other(_) => return ty.source(),
        }
    }
}
