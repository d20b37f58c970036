// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code generation for reflection and serialisation.
//!
//! The [`Encoder`] consumes the artefacts of one parsed file — its symbol
//! list, its [`TypeCollection`], the collections of previously processed
//! files, and the process-wide [`SymbolTable`] — and produces a
//! [`GeneratedUnit`]: the declarations buffer (`X_generated.h`) and the
//! definitions buffer (`X_generated.cpp`).
//!
//! # Architecture
//!
//! Emission is built on a [`Document`] tree (see [`document`]) rather than a
//! string buffer: emitter functions return composable documents that are
//! rendered once per buffer. Three emitter families exist:
//!
//! - reflection tables (`meta()`, `name()`, `properties()`, `size()`) in
//!   this module, including the recursive property-type descriptors;
//! - the byte-stream serialisation quartet in [`binary`];
//! - the JSON pair in [`json`].
//!
//! Classes emit their parent chain root-most ancestor first, so a derived
//! type serialises inherited state before its own. Properties whose type
//! cannot be serialised (pointers, references, unknown names, nested
//! containers) are silently skipped, matching the runtime's expectations.
//!
//! # Output stability
//!
//! [`write_if_changed`] compares the rendered buffer against the file on
//! disk and writes only on mismatch, so no-op regenerations leave
//! timestamps untouched and downstream builds see no changes.

pub mod classify;
pub mod document;

mod binary;
mod json;


use camino::{Utf8Path, Utf8PathBuf};
use ecow::EcoString;
use thiserror::Error;
use tracing::{debug, info};

use crate::docvec;

use crate::model::{
    Meta, Property, ROOT_TYPE, SymbolKind, SymbolTable, TypeClass, TypeCollection, TypeEnum,
};
use classify::{DecoratorKind, NativeKind};
use document::{Document, INDENT, concat, line, nest};

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A parent class is in neither the current file nor any earlier one.
    #[error("cannot resolve parent class '{name}'")]
    UnresolvedParent {
        /// The unresolved parent name.
        name: EcoString,
    },

    /// A symbol-list entry has no matching declaration.
    #[error("failed to find the symbol '{name}'")]
    MissingSymbol {
        /// The missing name.
        name: EcoString,
    },

    /// An output file could not be written.
    #[error("failed to write '{path}'")]
    Io {
        /// The output path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An invariant violation inside the encoder.
    #[error("internal error: {0}")]
    Internal(String),
}

/// The two generated buffers for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// The declarations buffer (`X_generated.h`).
    pub header: String,
    /// The definitions buffer (`X_generated.cpp`).
    pub source: String,
}

/// Derives the generated file names for an input file name:
/// `X.h` → (`X_generated.h`, `X_generated.cpp`).
#[must_use]
pub fn generated_file_names(input: &Utf8Path) -> (String, String) {
    let stem = input.file_stem().unwrap_or(input.as_str());
    (format!("{stem}_generated.h"), format!("{stem}_generated.cpp"))
}

/// Writes `content` to `path` only if the file is missing or differs.
///
/// Returns `true` when a write happened. Keeping timestamps stable across
/// no-op regenerations is part of the contract with downstream builds.
pub fn write_if_changed(path: &Utf8Path, content: &str) -> Result<bool, EncodeError> {
    if let Ok(existing) = std::fs::read_to_string(path) {
        if existing == content {
            debug!("{path} is up to date");
            return Ok(false);
        }
    }
    std::fs::write(path, content).map_err(|source| EncodeError::Io {
        path: path.to_owned(),
        source,
    })?;
    info!("{path} generated");
    Ok(true)
}

/// Shared lookup context for the emitter families.
pub(crate) struct EmitCtx<'a> {
    /// The process-wide symbol table.
    pub symbols: &'a SymbolTable,
    /// The current file's declarations.
    pub collection: &'a TypeCollection,
    /// The merged declarations of previously processed files.
    pub context: &'a TypeCollection,
}

impl EmitCtx<'_> {
    /// Looks up a class in the current file first, then in earlier files.
    pub fn find_class(&self, name: &str) -> Option<&TypeClass> {
        self.collection
            .find_class(name)
            .or_else(|| self.context.find_class(name))
    }

    /// Returns `true` if the named user type is a plain struct.
    ///
    /// Structs receive only static `reflect::Type<T>` entry points, so the
    /// generated code calls them statically; classes go through their
    /// reflected member interface. Types known only through the symbol
    /// table default to the class form.
    pub fn is_struct_type(&self, ty: &str) -> bool {
        let bare = classify::normalize(ty);
        self.find_class(&bare).is_some_and(|class| class.is_struct)
    }
}

/// The code generator for one input file.
pub struct Encoder<'a> {
    ctx: EmitCtx<'a>,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder over the given artefacts.
    #[must_use]
    pub fn new(
        collection: &'a TypeCollection,
        context: &'a TypeCollection,
        symbols: &'a SymbolTable,
    ) -> Self {
        Self {
            ctx: EmitCtx {
                symbols,
                collection,
                context,
            },
        }
    }

    /// Encodes the declarations named by `symbol_list` into the two
    /// generated buffers. `include_name` is the input file name referenced
    /// by the definitions buffer.
    pub fn encode(
        &self,
        symbol_list: &[EcoString],
        include_name: &str,
    ) -> Result<GeneratedUnit, EncodeError> {
        let mut enums: Vec<&TypeEnum> = Vec::new();
        let mut classes: Vec<&TypeClass> = Vec::new();

        for name in symbol_list {
            match self.ctx.symbols.kind_of(name) {
                Some(SymbolKind::Enum) => {
                    let type_enum = self.ctx.collection.find_enum(name).ok_or_else(|| {
                        EncodeError::MissingSymbol { name: name.clone() }
                    })?;
                    enums.push(type_enum);
                }
                Some(SymbolKind::Class) => {
                    let class = self.ctx.collection.find_class(name).ok_or_else(|| {
                        EncodeError::MissingSymbol { name: name.clone() }
                    })?;
                    classes.push(class);
                }
                None => {
                    return Err(EncodeError::MissingSymbol { name: name.clone() });
                }
            }
        }

        let mut header_blocks: Vec<Document<'static>> = vec![docvec![
            "// automatically generated by reflectc, do not modify",
            line(),
            "#pragma once",
            line(),
            line(),
            "#include <reflect/runtime.h>",
        ]];
        let mut source_blocks: Vec<Document<'static>> = vec![docvec![
            "// automatically generated by reflectc, do not modify",
            line(),
            format!("#include \"{include_name}\""),
        ]];

        for type_enum in &enums {
            header_blocks.push(enum_header(type_enum));
            source_blocks.push(enum_source(type_enum));
        }
        for class in &classes {
            let chain = self.parent_chain(class)?;
            header_blocks.push(class_header(class));
            source_blocks.push(self.class_source(class, &chain));
        }

        Ok(GeneratedUnit {
            header: render_blocks(header_blocks),
            source: render_blocks(source_blocks),
        })
    }

    /// Resolves a class's ancestors, root-most first.
    ///
    /// The chain terminates at the sentinel root; a missing link is an
    /// [`EncodeError::UnresolvedParent`], a cycle an internal error.
    fn parent_chain(&self, class: &TypeClass) -> Result<Vec<&TypeClass>, EncodeError> {
        let mut chain: Vec<&TypeClass> = Vec::new();
        let mut seen: Vec<&str> = vec![class.name.as_str()];
        let mut parent = class.parent.as_str();

        while parent != ROOT_TYPE {
            if seen.contains(&parent) {
                return Err(EncodeError::Internal(format!(
                    "inheritance cycle through '{parent}'"
                )));
            }
            let parent_class =
                self.ctx
                    .find_class(parent)
                    .ok_or_else(|| EncodeError::UnresolvedParent {
                        name: parent.into(),
                    })?;
            seen.push(parent_class.name.as_str());
            chain.push(parent_class);
            parent = parent_class.parent.as_str();
        }

        chain.reverse();
        Ok(chain)
    }

    /// Emits the definitions for one class: the reflection tables, the
    /// serialisation quartet, and (for non-structs) the member shims.
    fn class_source(&self, class: &TypeClass, chain: &[&TypeClass]) -> Document<'static> {
        let name = class.name.as_str();
        let mut parts: Vec<Document<'static>> = Vec::new();

        // meta() and name()
        parts.push(docvec![
            format!("const reflect::meta_t& reflect::Type<{name}>::meta()"),
            line(),
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    "static reflect::meta_t s_meta {",
                    nest(INDENT, meta_entries(&class.meta)),
                    line(),
                    "};",
                    line(),
                    "return s_meta;",
                ],
            ),
            line(),
            "}",
            line(),
            format!(
                "const char* const reflect::Type<{name}>::name() {{ return \"{name}\"; }}"
            ),
        ]);

        // properties()
        parts.push(docvec![
            format!("const reflect::properties_t& reflect::Type<{name}>::properties()"),
            line(),
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    "static reflect::properties_t s_properties {",
                    nest(INDENT, self.property_table(class, chain)),
                    line(),
                    "};",
                    line(),
                    "return s_properties;",
                ],
            ),
            line(),
            "}",
        ]);

        // size()
        parts.push(docvec![
            format!("std::size_t reflect::Type<{name}>::size()"),
            line(),
            "{",
            nest(INDENT, docvec![line(), format!("return sizeof({name});")]),
            line(),
            "}",
        ]);

        // Serialisation quartet
        parts.push(binary::from_string(&self.ctx, class, chain));
        parts.push(binary::to_string(&self.ctx, class, chain));
        parts.push(json::from_json(&self.ctx, class, chain));
        parts.push(json::to_json(&self.ctx, class, chain));

        // Member shims (classes only; structs are plain aggregates)
        if !class.is_struct {
            parts.push(member_shims(name));
        }

        blank_separated(parts)
    }

    /// Emits the ordered property table, parent-most ancestor first.
    fn property_table(&self, class: &TypeClass, chain: &[&TypeClass]) -> Document<'static> {
        let mut entries: Vec<Document<'static>> = Vec::new();

        for ancestor in chain {
            entries.push(docvec![
                line(),
                format!("// Parent class {} properties", ancestor.name),
            ]);
            for property in &ancestor.properties {
                entries.push(docvec![
                    line(),
                    self.property_entry(&class.name, property),
                    ","
                ]);
            }
        }
        if !chain.is_empty() {
            entries.push(docvec![line(), "// Properties"]);
        }
        for property in &class.properties {
            entries.push(docvec![
                line(),
                self.property_entry(&class.name, property),
                ","
            ]);
        }

        concat(entries)
    }

    /// Emits one property-table entry.
    fn property_entry(&self, owner: &str, property: &Property) -> Document<'static> {
        let name = property.name.as_str();
        docvec![
            format!("{{ \"{name}\", reflect::Property{{ offsetof({owner}, {name}), "),
            inline_meta(&property.meta),
            format!(", \"{name}\", "),
            self.descriptor(&property.ty),
            " } }",
        ]
    }

    /// Emits the recursive property-type descriptor for a declared type.
    fn descriptor(&self, ty: &str) -> Document<'static> {
        let ty = ty.trim();
        let decorator = classify::decorator_token(classify::decorator_of(ty));
        let native = classify::native_of(self.ctx.symbols, ty);
        let kind = classify::native_token(native);

        let arguments: Document<'static> = if native == NativeKind::Template {
            let children: Vec<Document<'static>> = classify::type_arguments(ty)
                .into_iter()
                .map(|argument| docvec![line(), self.descriptor(argument), ","])
                .collect();
            docvec![nest(INDENT, concat(children)), line()]
        } else {
            Document::Str("  ")
        };

        docvec![
            format!("reflect::PropertyType{{ \"{ty}\", {{"),
            arguments,
            format!("}}, {decorator}, sizeof({ty}), {kind} }}"),
        ]
    }
}

/// Renders top-level blocks separated by blank lines, with a trailing
/// newline.
fn render_blocks(blocks: Vec<Document<'static>>) -> String {
    let doc = blank_separated(blocks);
    let mut text = doc.render();
    text.push('\n');
    text
}

/// Joins documents with a blank line between each pair.
fn blank_separated(docs: Vec<Document<'static>>) -> Document<'static> {
    document::join(
        docs.into_iter().filter(|d| !d.is_nil()),
        &docvec![line(), line()],
    )
}

/// Emits the meta entries of a class-level `static reflect::meta_t` table.
fn meta_entries(meta: &Meta) -> Document<'static> {
    concat(
        meta.iter()
            .map(|(key, value)| docvec![line(), format!("{{ \"{key}\", \"{value}\" }},")]),
    )
}

/// Emits an inline `reflect::meta_t { … }` value for a property entry.
fn inline_meta(meta: &Meta) -> Document<'static> {
    if meta.is_empty() {
        return Document::Str("reflect::meta_t { }");
    }
    let entries: Vec<String> = meta
        .iter()
        .map(|(key, value)| format!("{{\"{key}\", \"{value}\"}}"))
        .collect();
    Document::String(format!("reflect::meta_t {{ {} }}", entries.join(", ")))
}

/// Emits the declarations-buffer specialisation for an enum.
fn enum_header(type_enum: &TypeEnum) -> Document<'static> {
    let name = type_enum.name.as_str();
    docvec![
        "template <>",
        line(),
        format!(
            "struct reflect::Enum<enum class {name}> : reflect::RegisteredInEnumFactory<enum class {name}>"
        ),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "static const char* const name();",
                line(),
                "static const reflect::enum_values_t& values();",
                line(),
                line(),
                "static bool registered() { return value; };",
            ],
        ),
        line(),
        "};",
    ]
}

/// Emits the definitions-buffer bodies for an enum.
fn enum_source(type_enum: &TypeEnum) -> Document<'static> {
    let name = type_enum.name.as_str();
    let values: Vec<Document<'static>> = type_enum
        .options
        .iter()
        .map(|option| {
            docvec![
                line(),
                format!("{{ \"{option}\", static_cast<int>({name}::{option}) }},"),
            ]
        })
        .collect();

    docvec![
        format!(
            "const char* const reflect::Enum<{name}>::name() {{ return \"{name}\"; }}"
        ),
        line(),
        format!("const reflect::enum_values_t& reflect::Enum<{name}>::values()"),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "static reflect::enum_values_t s_values{",
                nest(INDENT, concat(values)),
                line(),
                "};",
                line(),
                "return s_values;",
            ],
        ),
        line(),
        "}",
    ]
}

/// Emits the declarations-buffer specialisation for a class.
fn class_header(class: &TypeClass) -> Document<'static> {
    let name = class.name.as_str();
    let keyword = if class.is_struct { "struct" } else { "class" };
    docvec![
        "template <>",
        line(),
        format!(
            "struct reflect::Type<{keyword} {name}> : reflect::RegisteredInTypeFactory<{keyword} {name}>"
        ),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "static const reflect::meta_t& meta();",
                line(),
                "static const char* const name();",
                line(),
                "static const reflect::properties_t& properties();",
                line(),
                "static std::size_t size();",
                line(),
                line(),
                format!("static void from_string(const std::string& str, {name}& type);"),
                line(),
                format!("static std::string to_string(const {name}& type);"),
                line(),
                format!("static void from_json(const std::string& json, {name}& type);"),
                line(),
                format!(
                    "static std::string to_json(const {name}& type, const std::string& offset = \"\");"
                ),
                line(),
                line(),
                "static bool registered() { return value; };",
            ],
        ),
        line(),
        "};",
    ]
}

/// Emits the reflected member interface of a non-struct class.
fn member_shims(name: &str) -> Document<'static> {
    docvec![
        format!(
            "const reflect::meta_t& {name}::type_meta() const {{ return reflect::Type<{name}>::meta(); }}"
        ),
        line(),
        format!(
            "const char* const {name}::type_name() const {{ return reflect::Type<{name}>::name(); }}"
        ),
        line(),
        format!(
            "const reflect::properties_t& {name}::type_properties() const {{ return reflect::Type<{name}>::properties(); }}"
        ),
        line(),
        format!(
            "{name}::operator std::string() const {{ return reflect::Type<{name}>::to_string(*this); }}"
        ),
        line(),
        format!("void {name}::from_string(const std::string& str)"),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                format!("reflect::Type<{name}>::from_string(str, *this);"),
                line(),
                "type_initialize();",
            ],
        ),
        line(),
        "}",
        line(),
        format!("void {name}::from_json(const std::string& json)"),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                format!("reflect::Type<{name}>::from_json(json, *this);"),
                line(),
                "type_initialize();",
            ],
        ),
        line(),
        "}",
        line(),
        format!(
            "std::string {name}::to_json(const std::string& offset) const {{ return reflect::Type<{name}>::to_json(*this, offset); }}"
        ),
    ]
}

/// Emits the per-ancestor sections of a serialisation body: a comment
/// marker per ancestor, the ancestor's statements, then the class's own
/// statements behind a `// Properties` marker when any ancestor exists.
pub(crate) fn chain_sections<F>(
    class: &TypeClass,
    chain: &[&TypeClass],
    mut emit: F,
) -> Document<'static>
where
    F: FnMut(&Property) -> Option<Document<'static>>,
{
    let mut out: Vec<Document<'static>> = Vec::new();

    for ancestor in chain {
        out.push(docvec![
            line(),
            format!("// Parent class {} properties", ancestor.name),
        ]);
        for property in &ancestor.properties {
            if let Some(statement) = emit(property) {
                out.push(docvec![line(), statement]);
            }
        }
    }
    if !chain.is_empty() {
        out.push(docvec![line(), "// Properties"]);
    }
    for property in &class.properties {
        if let Some(statement) = emit(property) {
            out.push(docvec![line(), statement]);
        }
    }

    concat(out)
}

/// Returns `true` when a property participates in serialisation: its
/// decorator is raw and its type classifies to something the byte stream
/// can carry. Pointer- and reference-decorated properties are skipped
/// silently, as are unknown and unexpandable types.
pub(crate) fn is_serialisable(ctx: &EmitCtx<'_>, ty: &str) -> bool {
    if classify::decorator_of(ty) != DecoratorKind::Raw {
        return false;
    }
    binary::write_property(ctx, "value", ty).is_some()
}
