// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Classification of declared type strings.
//!
//! The encoder never resolves host-language types for real; it classifies
//! declared type strings against a small set of primitives, the symbol
//! table, and a template shape check. All functions here are pure over
//! `(&SymbolTable, &str)` and operate on verbatim type strings as captured
//! by the parser (e.g. `std::vector<std::unique_ptr<Foo>>`).

use crate::model::{SymbolKind, SymbolTable};

/// The decorator suffix of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoratorKind {
    /// No decorator: the value is stored inline.
    Raw,
    /// Trailing `*`.
    Pointer,
    /// Trailing `&`.
    Reference,
}

/// The native classification of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKind {
    Bool,
    Char,
    Int,
    Float,
    Double,
    String,
    Void,
    /// A user-declared enumeration.
    Enum,
    /// A user-declared class or struct.
    UserType,
    /// A parameterised container shape (`vector<…>`, `map<…>`, …).
    Template,
    /// Anything the symbol table does not know.
    Unknown,
}

/// Classifies the decorator suffix of a declared type.
#[must_use]
pub fn decorator_of(ty: &str) -> DecoratorKind {
    match ty.trim_end().chars().last() {
        Some('*') => DecoratorKind::Pointer,
        Some('&') => DecoratorKind::Reference,
        _ => DecoratorKind::Raw,
    }
}

/// Normalises a declared type for classification: strips the standard
/// namespace prefix and any trailing decorator or whitespace.
#[must_use]
pub fn normalize(ty: &str) -> String {
    let mut ty = ty.replace("std::", "");
    while ty.ends_with('*') || ty.ends_with('&') || ty.ends_with(' ') {
        ty.pop();
    }
    ty
}

/// Classifies a declared type against the primitives, the template shape,
/// and the symbol table.
#[must_use]
pub fn native_of(symbols: &SymbolTable, ty: &str) -> NativeKind {
    let ty = normalize(ty);
    if ty.is_empty() {
        return NativeKind::Unknown;
    }

    match ty.as_str() {
        "bool" => return NativeKind::Bool,
        "char" => return NativeKind::Char,
        "int" => return NativeKind::Int,
        "float" => return NativeKind::Float,
        "double" => return NativeKind::Double,
        "string" => return NativeKind::String,
        "void" => return NativeKind::Void,
        _ => {}
    }

    if ty.contains('<') {
        return NativeKind::Template;
    }

    match symbols.kind_of(&ty) {
        Some(SymbolKind::Class) => NativeKind::UserType,
        Some(SymbolKind::Enum) => NativeKind::Enum,
        None => NativeKind::Unknown,
    }
}

/// Returns the head identifier of a template-shaped type, with the standard
/// namespace prefix stripped: `std::vector<int>` → `vector`.
#[must_use]
pub fn template_head(ty: &str) -> &str {
    let ty = ty.trim();
    let head = ty.split('<').next().unwrap_or(ty).trim();
    head.strip_prefix("std::").unwrap_or(head)
}

/// Extracts the top-level type arguments of a template-shaped type.
///
/// The substring between the first `<` and the trailing `>` is split at
/// commas not enclosed by a deeper `<…>`; each argument is trimmed.
/// Returns an empty vector when the string is not template-shaped.
#[must_use]
pub fn type_arguments(ty: &str) -> Vec<&str> {
    let ty = ty.trim();
    let Some(open) = ty.find('<') else {
        return Vec::new();
    };
    if !ty.ends_with('>') {
        return Vec::new();
    }

    let inner = &ty[open + 1..ty.len() - 1];
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (index, c) in inner.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                arguments.push(inner[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    arguments.push(inner[start..].trim());
    arguments
}

/// Returns `true` if the template head names a sequence container.
#[must_use]
pub fn is_sequence_head(head: &str) -> bool {
    matches!(head, "vector" | "list")
}

/// Returns `true` if the template head names an associative container.
#[must_use]
pub fn is_map_head(head: &str) -> bool {
    matches!(head, "map" | "unordered_map")
}

/// Returns `true` if the template head names an owning smart pointer.
#[must_use]
pub fn is_owning_pointer_head(head: &str) -> bool {
    matches!(head, "shared_ptr" | "unique_ptr")
}

/// If `ty` is `shared_ptr<T>` / `unique_ptr<T>` with `T` a user class,
/// returns the pointee type.
#[must_use]
pub fn owning_pointee<'t>(symbols: &SymbolTable, ty: &'t str) -> Option<&'t str> {
    if !is_owning_pointer_head(template_head(ty)) {
        return None;
    }
    let arguments = type_arguments(ty);
    let pointee = arguments.first()?;
    (native_of(symbols, pointee) == NativeKind::UserType).then_some(*pointee)
}

/// Returns `true` if a sequence element of this kind can be serialised.
///
/// Template-shaped elements are rejected (nested containers are not
/// expanded), with the owning-pointer exception handled by the caller.
#[must_use]
pub fn is_valid_list_type(kind: NativeKind) -> bool {
    !matches!(
        kind,
        NativeKind::Template | NativeKind::Void | NativeKind::Unknown
    )
}

/// Returns `true` if a map key of this kind can be serialised.
#[must_use]
pub fn is_valid_map_key_type(kind: NativeKind) -> bool {
    is_valid_list_type(kind)
}

/// Returns `true` if a map value of this kind can be serialised.
#[must_use]
pub fn is_valid_map_value_type(kind: NativeKind) -> bool {
    is_valid_list_type(kind)
}

/// The generated-code spelling of a [`NativeKind`].
#[must_use]
pub fn native_token(kind: NativeKind) -> &'static str {
    match kind {
        NativeKind::Bool => "reflect::PropertyType::Type::T_bool",
        NativeKind::Char => "reflect::PropertyType::Type::T_char",
        NativeKind::Int => "reflect::PropertyType::Type::T_int",
        NativeKind::Float => "reflect::PropertyType::Type::T_float",
        NativeKind::Double => "reflect::PropertyType::Type::T_double",
        NativeKind::String => "reflect::PropertyType::Type::T_string",
        NativeKind::Void => "reflect::PropertyType::Type::T_void",
        NativeKind::Enum => "reflect::PropertyType::Type::T_enum",
        NativeKind::UserType => "reflect::PropertyType::Type::T_type",
        NativeKind::Template => "reflect::PropertyType::Type::T_template",
        NativeKind::Unknown => "reflect::PropertyType::Type::T_unknown",
    }
}

/// The generated-code spelling of a [`DecoratorKind`].
#[must_use]
pub fn decorator_token(kind: DecoratorKind) -> &'static str {
    match kind {
        DecoratorKind::Raw => "reflect::PropertyType::DecoratorType::D_raw",
        DecoratorKind::Pointer => "reflect::PropertyType::DecoratorType::D_pointer",
        DecoratorKind::Reference => "reflect::PropertyType::DecoratorType::D_reference",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolKind;

    fn symbols() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.declare("Foo".into(), SymbolKind::Class);
        table.declare("Color".into(), SymbolKind::Enum);
        table
    }

    #[test]
    fn decorator_classification() {
        assert_eq!(decorator_of("int"), DecoratorKind::Raw);
        assert_eq!(decorator_of("Foo*"), DecoratorKind::Pointer);
        assert_eq!(decorator_of("Foo&"), DecoratorKind::Reference);
        assert_eq!(decorator_of("Foo* "), DecoratorKind::Pointer);
    }

    #[test]
    fn native_classification_primitives() {
        let table = symbols();
        assert_eq!(native_of(&table, "bool"), NativeKind::Bool);
        assert_eq!(native_of(&table, "char"), NativeKind::Char);
        assert_eq!(native_of(&table, "int"), NativeKind::Int);
        assert_eq!(native_of(&table, "float"), NativeKind::Float);
        assert_eq!(native_of(&table, "double"), NativeKind::Double);
        assert_eq!(native_of(&table, "void"), NativeKind::Void);
        assert_eq!(native_of(&table, "std::string"), NativeKind::String);
        assert_eq!(native_of(&table, "string"), NativeKind::String);
    }

    #[test]
    fn native_classification_strips_decorators() {
        let table = symbols();
        assert_eq!(native_of(&table, "Foo*"), NativeKind::UserType);
        assert_eq!(native_of(&table, "Foo&"), NativeKind::UserType);
        assert_eq!(native_of(&table, "int *"), NativeKind::Int);
    }

    #[test]
    fn native_classification_user_types() {
        let table = symbols();
        assert_eq!(native_of(&table, "Foo"), NativeKind::UserType);
        assert_eq!(native_of(&table, "Color"), NativeKind::Enum);
        assert_eq!(native_of(&table, "Mystery"), NativeKind::Unknown);
        assert_eq!(native_of(&table, ""), NativeKind::Unknown);
    }

    #[test]
    fn native_classification_templates() {
        let table = symbols();
        assert_eq!(native_of(&table, "std::vector<int>"), NativeKind::Template);
        assert_eq!(native_of(&table, "map<string, Foo>"), NativeKind::Template);
    }

    #[test]
    fn template_head_strips_namespace() {
        assert_eq!(template_head("std::vector<int>"), "vector");
        assert_eq!(template_head("vector<int>"), "vector");
        assert_eq!(template_head("std::unordered_map<int, int>"), "unordered_map");
        assert_eq!(template_head("int"), "int");
    }

    #[test]
    fn type_arguments_simple() {
        assert_eq!(type_arguments("std::vector<int>"), vec!["int"]);
        assert_eq!(
            type_arguments("std::map<std::string, int>"),
            vec!["std::string", "int"]
        );
    }

    #[test]
    fn type_arguments_nested() {
        assert_eq!(
            type_arguments("std::map<std::string, std::vector<int>>"),
            vec!["std::string", "std::vector<int>"]
        );
        assert_eq!(
            type_arguments("std::vector<std::unique_ptr<Foo>>"),
            vec!["std::unique_ptr<Foo>"]
        );
        assert_eq!(
            type_arguments("std::tuple<int, std::map<int, float>, bool>"),
            vec!["int", "std::map<int, float>", "bool"]
        );
    }

    #[test]
    fn type_arguments_non_template() {
        assert!(type_arguments("int").is_empty());
        assert!(type_arguments("std::vector<int").is_empty());
    }

    #[test]
    fn owning_pointee_detection() {
        let table = symbols();
        assert_eq!(owning_pointee(&table, "std::shared_ptr<Foo>"), Some("Foo"));
        assert_eq!(owning_pointee(&table, "std::unique_ptr<Foo>"), Some("Foo"));
        assert_eq!(owning_pointee(&table, "std::unique_ptr<int>"), None);
        assert_eq!(owning_pointee(&table, "std::vector<Foo>"), None);
    }

    #[test]
    fn container_validity() {
        assert!(is_valid_list_type(NativeKind::Int));
        assert!(is_valid_list_type(NativeKind::UserType));
        assert!(!is_valid_list_type(NativeKind::Template));
        assert!(!is_valid_list_type(NativeKind::Void));
        assert!(!is_valid_list_type(NativeKind::Unknown));
        assert!(!is_valid_map_key_type(NativeKind::Template));
        assert!(!is_valid_map_value_type(NativeKind::Unknown));
    }
}
