// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The declaration model extracted from annotated source files.
//!
//! The parser produces one [`TypeCollection`] per translation unit, plus an
//! ordered symbol list that drives deterministic emission. The
//! [`SymbolTable`] is process-wide: the driver owns it, every parsed file
//! extends it, and every later file's encoder reads it so cross-file
//! references resolve.

use std::collections::HashMap;

use ecow::EcoString;

/// The conventional parent name indicating "no further parent".
pub const ROOT_TYPE: &str = "IType";

/// The kind of a declared symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// A class or struct declaration.
    Class,
    /// An enumeration declaration.
    Enum,
}

/// Process-wide table of declared symbol names.
///
/// Names are globally unique across all input files; a second declaration
/// of an existing name is a parse error.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<EcoString, SymbolKind>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a symbol. Returns `false` if the name is already taken.
    pub fn declare(&mut self, name: EcoString, kind: SymbolKind) -> bool {
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, kind);
        true
    }

    /// Looks up the kind of a declared name.
    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<SymbolKind> {
        self.entries.get(name).copied()
    }

    /// Returns `true` if the name is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the number of declared symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no symbols are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An insertion-ordered key/value meta block.
///
/// Attached to class annotations and property annotations. Keys are unique
/// within one block; insertion order is preserved for emission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meta {
    entries: Vec<(EcoString, EcoString)>,
}

impl Meta {
    /// Creates an empty meta block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a key/value pair. Returns `false` if the key already exists.
    pub fn insert(&mut self, key: EcoString, value: EcoString) -> bool {
        if self.entries.iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    /// Looks up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EcoString, &EcoString)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Returns `true` if the block has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A reflected property of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// The property name.
    pub name: EcoString,
    /// The declared type, verbatim from source (e.g. `std::vector<int>`).
    pub ty: EcoString,
    /// Meta attached to the property annotation.
    pub meta: Meta,
}

/// A reflected class or struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeClass {
    /// The declared name.
    pub name: EcoString,
    /// `true` for `struct` declarations (plain aggregates without the
    /// reflected member interface).
    pub is_struct: bool,
    /// The parent class name; [`ROOT_TYPE`] when the declaration has no
    /// explicit parent.
    pub parent: EcoString,
    /// Meta attached to the class annotation.
    pub meta: Meta,
    /// Properties in declaration order.
    pub properties: Vec<Property>,
}

/// A reflected enumeration declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEnum {
    /// The declared name.
    pub name: EcoString,
    /// Option names in declaration order. Integer values are implicit and
    /// sequential from zero.
    pub options: Vec<EcoString>,
}

/// The declarations of one translation unit.
#[derive(Debug, Default)]
pub struct TypeCollection {
    classes: HashMap<EcoString, TypeClass>,
    enums: HashMap<EcoString, TypeEnum>,
}

impl TypeCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class declaration.
    pub fn add_class(&mut self, class: TypeClass) {
        self.classes.insert(class.name.clone(), class);
    }

    /// Adds an enum declaration.
    pub fn add_enum(&mut self, type_enum: TypeEnum) {
        self.enums.insert(type_enum.name.clone(), type_enum);
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Option<&TypeClass> {
        self.classes.get(name)
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn find_enum(&self, name: &str) -> Option<&TypeEnum> {
        self.enums.get(name)
    }

    /// Moves every declaration of `other` into this collection.
    ///
    /// Used by the driver to accumulate the declarations of already
    /// processed files so later files can resolve cross-file parents.
    pub fn absorb(&mut self, other: TypeCollection) {
        self.classes.extend(other.classes);
        self.enums.extend(other.enums);
    }

    /// Returns `true` if the collection holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.enums.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_table_rejects_redeclaration() {
        let mut table = SymbolTable::new();
        assert!(table.declare("Foo".into(), SymbolKind::Class));
        assert!(!table.declare("Foo".into(), SymbolKind::Enum));
        assert_eq!(table.kind_of("Foo"), Some(SymbolKind::Class));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn meta_preserves_insertion_order() {
        let mut meta = Meta::new();
        assert!(meta.insert("b".into(), "2".into()));
        assert!(meta.insert("a".into(), "1".into()));
        let keys: Vec<_> = meta.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn meta_rejects_duplicate_keys() {
        let mut meta = Meta::new();
        assert!(meta.insert("key".into(), "1".into()));
        assert!(!meta.insert("key".into(), "2".into()));
        assert_eq!(meta.get("key"), Some("1"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn collection_absorb_merges_declarations() {
        let mut first = TypeCollection::new();
        first.add_enum(TypeEnum {
            name: "Color".into(),
            options: vec!["Red".into()],
        });

        let mut second = TypeCollection::new();
        second.add_class(TypeClass {
            name: "Foo".into(),
            is_struct: false,
            parent: ROOT_TYPE.into(),
            meta: Meta::new(),
            properties: Vec::new(),
        });

        first.absorb(second);
        assert!(first.find_enum("Color").is_some());
        assert!(first.find_class("Foo").is_some());
    }
}
