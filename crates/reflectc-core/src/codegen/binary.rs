// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Byte-stream serialisation emitters.
//!
//! Generated `to_string`/`from_string` bodies drive the runtime's
//! `OutputByteStream`/`InputByteStream` pair. Dispatch is per property on
//! the native classification of its declared type:
//!
//! - primitives and strings stream directly;
//! - enums stream as `int`;
//! - user types embed their own byte-string form;
//! - `vector`/`list` stream a length then each element recursively;
//! - `map`/`unordered_map` stream a length then each key/value pair;
//! - `shared_ptr`/`unique_ptr` to a user class stream a validity flag and,
//!   when set, the pointee's byte-string — the reader peeks the embedded
//!   type tag and dispatches construction through the runtime registry, so
//!   a base-typed field round-trips a derived instance.
//!
//! Anything else (pointer/reference decorators, unknown names, nested
//! containers) emits no code: the property is skipped on both sides.

use crate::docvec;
use crate::model::{Property, TypeClass};

use super::classify::{
    self, DecoratorKind, NativeKind, is_map_head, is_owning_pointer_head, is_sequence_head,
    is_valid_list_type, is_valid_map_key_type, is_valid_map_value_type, owning_pointee,
};
use super::document::{Document, INDENT, line, nest};
use super::{EmitCtx, chain_sections};

/// Emits the `from_string` definition for a class.
pub(super) fn from_string(
    ctx: &EmitCtx<'_>,
    class: &TypeClass,
    chain: &[&TypeClass],
) -> Document<'static> {
    let name = class.name.as_str();
    let body = chain_sections(class, chain, |property: &Property| {
        read_property(ctx, &format!("type.{}", property.name), &property.ty)
    });

    docvec![
        format!("void reflect::Type<{name}>::from_string(const std::string& str, {name}& type)"),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "reflect::encoding::ByteBuffer buffer;",
                line(),
                "std::transform(",
                nest(
                    INDENT,
                    docvec![
                        line(),
                        "std::begin(str),",
                        line(),
                        "std::end(str),",
                        line(),
                        "std::back_inserter(buffer),",
                        line(),
                        "[](const char c)",
                        line(),
                        "{",
                        nest(INDENT, docvec![line(), "return std::byte(c);"]),
                        line(),
                        "}",
                    ],
                ),
                line(),
                ");",
                line(),
                line(),
                "reflect::encoding::InputByteStream stream(buffer);",
                line(),
                "std::string _name;",
                line(),
                "stream >> _name;",
                line(),
                "if (_name != name()) return;",
                line(),
                body,
            ],
        ),
        line(),
        "}",
    ]
}

/// Emits the `to_string` definition for a class.
pub(super) fn to_string(
    ctx: &EmitCtx<'_>,
    class: &TypeClass,
    chain: &[&TypeClass],
) -> Document<'static> {
    let name = class.name.as_str();
    let body = chain_sections(class, chain, |property: &Property| {
        write_property(ctx, &format!("type.{}", property.name), &property.ty)
    });

    docvec![
        format!("std::string reflect::Type<{name}>::to_string(const {name}& type)"),
        line(),
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "reflect::encoding::ByteBuffer buffer;",
                line(),
                "reflect::encoding::OutputByteStream stream(buffer);",
                line(),
                "stream << name();",
                line(),
                body,
                line(),
                line(),
                "return std::string(reinterpret_cast<const char*>(&stream.getBuffer()[0]), stream.getBuffer().size());",
            ],
        ),
        line(),
        "}",
    ]
}

/// Emits the stream-write statement(s) for one value, or `None` when the
/// type cannot be serialised.
pub(crate) fn write_property(
    ctx: &EmitCtx<'_>,
    target: &str,
    ty: &str,
) -> Option<Document<'static>> {
    if classify::decorator_of(ty) != DecoratorKind::Raw {
        return None;
    }
    let ty = ty.trim();

    match classify::native_of(ctx.symbols, ty) {
        NativeKind::Bool
        | NativeKind::Char
        | NativeKind::Int
        | NativeKind::Float
        | NativeKind::Double
        | NativeKind::String => Some(Document::String(format!("stream << {target};"))),

        NativeKind::Enum => Some(Document::String(format!(
            "stream << static_cast<int>({target});"
        ))),

        NativeKind::UserType => {
            if ctx.is_struct_type(ty) {
                Some(Document::String(format!(
                    "stream << reflect::Type<{ty}>::to_string({target});"
                )))
            } else {
                Some(Document::String(format!(
                    "stream << static_cast<std::string>({target});"
                )))
            }
        }

        NativeKind::Template => write_template(ctx, target, ty),

        NativeKind::Void | NativeKind::Unknown => None,
    }
}

/// Emits the stream-write block for a template-shaped value.
fn write_template(ctx: &EmitCtx<'_>, target: &str, ty: &str) -> Option<Document<'static>> {
    let head = classify::template_head(ty);
    let arguments = classify::type_arguments(ty);
    if arguments.is_empty() {
        return None;
    }

    if is_sequence_head(head) {
        let element = arguments[0];
        let element_write = if owning_pointee(ctx.symbols, element).is_some() {
            docvec![
                "stream << (element ? true : false);",
                line(),
                "if (element) stream << static_cast<std::string>(*element);",
            ]
        } else if is_valid_list_type(classify::native_of(ctx.symbols, element)) {
            write_property(ctx, "element", element)?
        } else {
            return None;
        };

        return Some(docvec![
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    format!("stream << {target}.size();"),
                    line(),
                    format!("for (const auto& element : {target})"),
                    line(),
                    "{",
                    nest(INDENT, docvec![line(), element_write]),
                    line(),
                    "}",
                ],
            ),
            line(),
            "}",
        ]);
    }

    if is_map_head(head) {
        if arguments.len() < 2 {
            return None;
        }
        let (key, value) = (arguments[0], arguments[1]);
        if !is_valid_map_key_type(classify::native_of(ctx.symbols, key))
            || !is_valid_map_value_type(classify::native_of(ctx.symbols, value))
        {
            return None;
        }
        let key_write = write_property(ctx, "pair.first", key)?;
        let value_write = write_property(ctx, "pair.second", value)?;

        return Some(docvec![
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    format!("stream << {target}.size();"),
                    line(),
                    format!("for (const auto& pair : {target})"),
                    line(),
                    "{",
                    nest(INDENT, docvec![line(), key_write, line(), value_write]),
                    line(),
                    "}",
                ],
            ),
            line(),
            "}",
        ]);
    }

    if is_owning_pointer_head(head) {
        owning_pointee(ctx.symbols, ty)?;
        return Some(docvec![
            format!("stream << ({target} ? true : false);"),
            line(),
            format!("if ({target}) stream << static_cast<std::string>(*{target});"),
        ]);
    }

    None
}

/// Emits the stream-read statement(s) for one value, or `None` when the
/// type cannot be serialised. Structural mirror of [`write_property`].
pub(crate) fn read_property(
    ctx: &EmitCtx<'_>,
    target: &str,
    ty: &str,
) -> Option<Document<'static>> {
    if classify::decorator_of(ty) != DecoratorKind::Raw {
        return None;
    }
    let ty = ty.trim();

    match classify::native_of(ctx.symbols, ty) {
        NativeKind::Bool
        | NativeKind::Char
        | NativeKind::Int
        | NativeKind::Float
        | NativeKind::Double
        | NativeKind::String => Some(Document::String(format!("stream >> {target};"))),

        NativeKind::Enum => Some(docvec![
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    "int pack;",
                    line(),
                    "stream >> pack;",
                    line(),
                    format!("{target} = static_cast<{ty}>(pack);"),
                ],
            ),
            line(),
            "}",
        ]),

        NativeKind::UserType => {
            let reconstruct = if ctx.is_struct_type(ty) {
                format!("reflect::Type<{ty}>::from_string(pack, {target});")
            } else {
                format!("{target}.from_string(pack);")
            };
            Some(docvec![
                "{",
                nest(
                    INDENT,
                    docvec![
                        line(),
                        "std::string pack;",
                        line(),
                        "stream >> pack;",
                        line(),
                        reconstruct,
                    ],
                ),
                line(),
                "}",
            ])
        }

        NativeKind::Template => read_template(ctx, target, ty),

        NativeKind::Void | NativeKind::Unknown => None,
    }
}

/// Emits the stream-read block for a template-shaped value.
fn read_template(ctx: &EmitCtx<'_>, target: &str, ty: &str) -> Option<Document<'static>> {
    let head = classify::template_head(ty);
    let arguments = classify::type_arguments(ty);
    if arguments.is_empty() {
        return None;
    }

    if is_sequence_head(head) {
        let element = arguments[0];
        let element_read = if let Some(pointee) = owning_pointee(ctx.symbols, element) {
            owning_pointer_read(element, pointee, "element")
        } else if is_valid_list_type(classify::native_of(ctx.symbols, element)) {
            read_property(ctx, "element", element)?
        } else {
            return None;
        };

        return Some(docvec![
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    format!("{target}.clear();"),
                    line(),
                    "std::size_t size;",
                    line(),
                    "stream >> size;",
                    line(),
                    "for (std::size_t i = 0; i < size; ++i)",
                    line(),
                    "{",
                    nest(
                        INDENT,
                        docvec![
                            line(),
                            format!("{element} element;"),
                            line(),
                            element_read,
                            line(),
                            format!("{target}.push_back(std::move(element));"),
                        ],
                    ),
                    line(),
                    "}",
                ],
            ),
            line(),
            "}",
        ]);
    }

    if is_map_head(head) {
        if arguments.len() < 2 {
            return None;
        }
        let (key, value) = (arguments[0], arguments[1]);
        if !is_valid_map_key_type(classify::native_of(ctx.symbols, key))
            || !is_valid_map_value_type(classify::native_of(ctx.symbols, value))
        {
            return None;
        }
        let key_read = read_property(ctx, "key", key)?;
        let value_read = read_property(ctx, "value", value)?;

        return Some(docvec![
            "{",
            nest(
                INDENT,
                docvec![
                    line(),
                    "std::size_t size;",
                    line(),
                    "stream >> size;",
                    line(),
                    "for (std::size_t i = 0; i < size; ++i)",
                    line(),
                    "{",
                    nest(
                        INDENT,
                        docvec![
                            line(),
                            format!("{key} key;"),
                            line(),
                            key_read,
                            line(),
                            format!("{value} value;"),
                            line(),
                            value_read,
                            line(),
                            format!("{target}.insert(std::make_pair(key, value));"),
                        ],
                    ),
                    line(),
                    "}",
                ],
            ),
            line(),
            "}",
        ]);
    }

    if is_owning_pointer_head(head) {
        let pointee = owning_pointee(ctx.symbols, ty)?;
        return Some(owning_pointer_read(ty, pointee, target));
    }

    None
}

/// Emits the polymorphic read block for an owning pointer.
///
/// The wire form is a validity flag followed by the pointee's byte-string,
/// which itself carries `(length, type-tag, body)`. A secondary stream
/// peeks the tag so the reader can construct the static type directly or
/// dispatch through the runtime registry when the tag names a derived type.
fn owning_pointer_read(ty: &str, pointee: &str, target: &str) -> Document<'static> {
    let constructor = if classify::template_head(ty) == "shared_ptr" {
        "std::make_shared"
    } else {
        "std::make_unique"
    };

    docvec![
        "{",
        nest(
            INDENT,
            docvec![
                line(),
                "bool valid = false;",
                line(),
                "stream >> valid;",
                line(),
                "if (valid)",
                line(),
                "{",
                nest(
                    INDENT,
                    docvec![
                        line(),
                        "reflect::encoding::InputByteStream temp_stream(buffer, stream.getIndex());",
                        line(),
                        "std::size_t temp_size;",
                        line(),
                        "temp_stream >> temp_size;",
                        line(),
                        "std::string type_id;",
                        line(),
                        "temp_stream >> type_id;",
                        line(),
                        format!("if (type_id == reflect::Type<{pointee}>::name())"),
                        line(),
                        "{",
                        nest(
                            INDENT,
                            docvec![line(), format!("{target} = {constructor}<{pointee}>();")],
                        ),
                        line(),
                        "}",
                        line(),
                        "else",
                        line(),
                        "{",
                        nest(
                            INDENT,
                            docvec![
                                line(),
                                format!(
                                    "{target} = {ty}(reflect::TypeFactory::instantiate<{pointee}>(type_id));"
                                ),
                            ],
                        ),
                        line(),
                        "}",
                        line(),
                        "{",
                        nest(
                            INDENT,
                            docvec![
                                line(),
                                "std::string pack;",
                                line(),
                                "stream >> pack;",
                                line(),
                                format!("{target}->from_string(pack);"),
                            ],
                        ),
                        line(),
                        "}",
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
