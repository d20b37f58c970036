// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! JSON serialisation emitters.
//!
//! Generated `to_json` bodies print one `"name": <value>` line per
//! serialisable property, opening with a `"type_id"` line carrying the type
//! name. Container and smart-pointer values delegate to the runtime's
//! recursive `json::Serializer`; nested user types recurse through their own
//! `to_json` with an increased offset.
//!
//! Generated `from_json` bodies drive the runtime's `json::Deserializer`
//! key/value splitter and dispatch each key to the matching field parse.
//!
//! The skip rules are exactly those of the byte-stream emitters: a property
//! the binary codec skips produces no JSON either.

use crate::docvec;
use crate::model::{Property, TypeClass};

use super::classify::{self, NativeKind};
use super::document::{Document, INDENT, line, nest};
use super::{EmitCtx, chain_sections, is_serialisable};

/// Emits the `to_json` definition for a class.
pub(super) fn to_json(
    ctx: &EmitCtx<'_>,
    class: &TypeClass,
    chain: &[&TypeClass],
) -> Document<'static> {
    let name = class.name.as_str();
    let body = chain_sections(class, chain, |property: &Property| {
        to_json_line(ctx, property)
    });

    docvec![
        format!(
            "std::string reflect::Type<{name}>::to_json(const {name}& type, const std::string& offset)"
        ),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "std::stringstream stream;",
                line(),
                "stream << \"{\" << std::endl;",
                line(),
                format!(
                    "stream << offset << \"    \" << \"\\\"type_id\\\": \" << \"\\\"{name}\\\"\" << \",\" << std::endl;"
                ),
                body,
                line(),
                "stream << offset << \"}\";",
                line(),
                "return stream.str();",
            ],
        ),
        line(),
        "}",
    ]
}

/// Emits the `from_json` definition for a class.
pub(super) fn from_json(
    ctx: &EmitCtx<'_>,
    class: &TypeClass,
    chain: &[&TypeClass],
) -> Document<'static> {
    let name = class.name.as_str();
    let body = chain_sections(class, chain, |property: &Property| {
        from_json_line(ctx, property)
    });

    docvec![
        format!("void reflect::Type<{name}>::from_json(const std::string& json, {name}& type)"),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "std::string src{ reflect::encoding::json::Deserializer::trim(json, reflect::encoding::json::Deserializer::space) };",
                line(),
                line(),
                "size_t index = 0;",
                line(),
                "std::string key;",
                line(),
                "while ((index = reflect::encoding::json::Deserializer::next_key(src, key)) != std::string::npos)",
                line(),
                "{",
                nest(
                    INDENT,
                    docvec![
                        line(),
                        "src = src.substr(index + 2);",
                        line(),
                        "src = reflect::encoding::json::Deserializer::ltrim(src, reflect::encoding::json::Deserializer::space);",
                        line(),
                        "std::string value;",
                        line(),
                        "index = reflect::encoding::json::Deserializer::next_value(src, value);",
                        line(),
                        "if (index != std::string::npos)",
                        line(),
                        "{",
                        nest(INDENT, docvec![body, line(), "src = src.substr(index + 1);"]),
                        line(),
                        "}",
                        line(),
                        "else break;",
                    ],
                ),
                line(),
                "}",
            ],
        ),
        line(),
        "}",
    ]
}

/// Emits one `"name": <value>` print line, or `None` when the property is
/// not serialisable.
fn to_json_line(ctx: &EmitCtx<'_>, property: &Property) -> Option<Document<'static>> {
    let ty = property.ty.trim();
    if !is_serialisable(ctx, ty) {
        return None;
    }
    let name = property.name.as_str();
    let target = format!("type.{name}");

    let value = match classify::native_of(ctx.symbols, ty) {
        NativeKind::Enum => {
            format!("reflect::encoding::json::Serializer::to_string(static_cast<int>({target}))")
        }
        NativeKind::UserType => {
            if ctx.is_struct_type(ty) {
                format!("reflect::Type<{ty}>::to_json({target}, offset + \"    \")")
            } else {
                format!("{target}.to_json(offset + \"    \")")
            }
        }
        _ => format!("reflect::encoding::json::Serializer::to_string({target})"),
    };

    Some(Document::String(format!(
        "stream << offset << \"    \" << \"\\\"{name}\\\": \" << {value} << \",\" << std::endl;"
    )))
}

/// Emits one `if (key == "name") …` dispatch line, or `None` when the
/// property is not serialisable.
fn from_json_line(ctx: &EmitCtx<'_>, property: &Property) -> Option<Document<'static>> {
    let ty = property.ty.trim();
    if !is_serialisable(ctx, ty) {
        return None;
    }
    let name = property.name.as_str();
    let target = format!("type.{name}");

    let statement = match classify::native_of(ctx.symbols, ty) {
        NativeKind::Enum => {
            format!(
                "if (key == \"{name}\") {{ int pack = 0; reflect::encoding::json::Deserializer::parse(value, pack); {target} = static_cast<{ty}>(pack); }}"
            )
        }
        NativeKind::UserType => {
            if ctx.is_struct_type(ty) {
                format!("if (key == \"{name}\") reflect::Type<{ty}>::from_json(value, {target});")
            } else {
                format!("if (key == \"{name}\") {target}.from_json(value);")
            }
        }
        _ => format!(
            "if (key == \"{name}\") reflect::encoding::json::Deserializer::parse(value, {target});"
        ),
    };

    Some(Document::String(statement))
}
