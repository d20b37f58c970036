// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the build pipeline.
//!
//! These tests drive the command implementations directly over temporary
//! directories: fixture headers in, `_generated.h` / `_generated.cpp` out.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use reflectc_cli::commands::build::{BuildOptions, build};
use reflectc_cli::commands::check::check;

/// A fixture header with an enum, a struct, and an inheriting class.
const FIXTURE: &str = r#"#pragma once

#include <string>
#include <vector>

ENUM()
enum class Color
{
    Red,
    Green,
    Blue
};

STRUCT()
struct Vec2
{
    PROPERTY() float x;
    PROPERTY() float y;
};

CLASS(Category = Test)
class Entity
{
public:
    PROPERTY() int id;
    PROPERTY(JsonExport = true) std::string name;
    PROPERTY() Vec2 position;
    PROPERTY() Color color;
    PROPERTY() std::vector<int> tags;
};
"#;

fn write_fixture(dir: &Path, name: &str, content: &str) -> Utf8PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    Utf8PathBuf::from_path_buf(path).expect("utf-8 path")
}

fn mtime(path: &Utf8Path) -> SystemTime {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .expect("file metadata")
}

#[test]
fn build_generates_both_files() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path(), "scene.h", FIXTURE);

    build(&[dir.path().to_str().unwrap().to_string()], &BuildOptions {
        quiet: true,
        ..Default::default()
    })
    .expect("build should succeed");

    let header = fs::read_to_string(dir.path().join("scene_generated.h")).expect("header exists");
    let source = fs::read_to_string(dir.path().join("scene_generated.cpp")).expect("source exists");

    assert!(header.contains("#include <reflect/runtime.h>"));
    assert!(header.contains("reflect::Enum<enum class Color>"));
    assert!(header.contains("reflect::Type<struct Vec2>"));
    assert!(header.contains("reflect::Type<class Entity>"));

    assert!(source.contains("#include \"scene.h\""));
    assert!(source.contains("{ \"Red\", static_cast<int>(Color::Red) },"));
    assert!(source.contains("stream << type.id;"));
    assert!(source.contains("stream << reflect::Type<Vec2>::to_string(type.position);"));
    assert!(source.contains("stream << static_cast<int>(type.color);"));
}

#[test]
fn rerun_is_a_no_op() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path(), "scene.h", FIXTURE);
    let options = BuildOptions {
        quiet: true,
        ..Default::default()
    };
    let paths = vec![dir.path().to_str().unwrap().to_string()];

    build(&paths, &options).expect("first build");
    let header_path =
        Utf8PathBuf::from_path_buf(dir.path().join("scene_generated.h")).expect("utf-8");
    let source_path =
        Utf8PathBuf::from_path_buf(dir.path().join("scene_generated.cpp")).expect("utf-8");
    let header_mtime = mtime(&header_path);
    let source_mtime = mtime(&source_path);

    // A coarse-mtime filesystem could mask an unwanted rewrite without this.
    std::thread::sleep(std::time::Duration::from_millis(20));

    build(&paths, &options).expect("second build");
    assert_eq!(mtime(&header_path), header_mtime, "header was rewritten");
    assert_eq!(mtime(&source_path), source_mtime, "source was rewritten");
}

#[test]
fn changed_input_regenerates() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path(), "scene.h", FIXTURE);
    let options = BuildOptions {
        quiet: true,
        ..Default::default()
    };
    let paths = vec![dir.path().to_str().unwrap().to_string()];

    build(&paths, &options).expect("first build");
    write_fixture(
        dir.path(),
        "scene.h",
        &FIXTURE.replace("PROPERTY() int id;", "PROPERTY() int id;\n    PROPERTY() bool alive;"),
    );
    build(&paths, &options).expect("second build");

    let source = fs::read_to_string(dir.path().join("scene_generated.cpp")).expect("source");
    assert!(source.contains("stream << type.alive;"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path(), "scene.h", FIXTURE);

    build(&[dir.path().to_str().unwrap().to_string()], &BuildOptions {
        quiet: true,
        dry_run: true,
        ..Default::default()
    })
    .expect("dry run should succeed");

    assert!(!dir.path().join("scene_generated.h").exists());
    assert!(!dir.path().join("scene_generated.cpp").exists());
}

#[test]
fn out_dir_redirects_output() {
    let dir = TempDir::new().expect("temp dir");
    let out = TempDir::new().expect("out dir");
    write_fixture(dir.path(), "scene.h", FIXTURE);

    build(&[dir.path().to_str().unwrap().to_string()], &BuildOptions {
        out_dir: Some(Utf8PathBuf::from_path_buf(out.path().to_path_buf()).expect("utf-8")),
        quiet: true,
        ..Default::default()
    })
    .expect("build should succeed");

    assert!(out.path().join("scene_generated.h").exists());
    assert!(out.path().join("scene_generated.cpp").exists());
    assert!(!dir.path().join("scene_generated.h").exists());
}

#[test]
fn failing_file_does_not_stop_siblings() {
    let dir = TempDir::new().expect("temp dir");
    // Lexicographically first, and broken: missing closing brace.
    write_fixture(
        dir.path(),
        "broken.h",
        "CLASS()\nclass Broken\n{\n    PROPERTY() int x;\n",
    );
    write_fixture(dir.path(), "scene.h", FIXTURE);

    let result = build(&[dir.path().to_str().unwrap().to_string()], &BuildOptions {
        quiet: true,
        ..Default::default()
    });
    assert!(result.is_err(), "build must report the broken file");

    // The broken file produced nothing; the sibling still generated.
    assert!(!dir.path().join("broken_generated.h").exists());
    assert!(dir.path().join("scene_generated.h").exists());
    assert!(dir.path().join("scene_generated.cpp").exists());
}

#[test]
fn cross_file_inheritance_resolves() {
    let dir = TempDir::new().expect("temp dir");
    // Sorted order puts the base first.
    write_fixture(
        dir.path(),
        "a_base.h",
        "CLASS()\nclass Base\n{\n    PROPERTY() int a;\n};\n",
    );
    write_fixture(
        dir.path(),
        "b_child.h",
        "CLASS()\nclass Child : public Base\n{\n    PROPERTY() int b;\n};\n",
    );

    build(&[dir.path().to_str().unwrap().to_string()], &BuildOptions {
        quiet: true,
        ..Default::default()
    })
    .expect("cross-file parent should resolve");

    let source = fs::read_to_string(dir.path().join("b_child_generated.cpp")).expect("source");
    assert!(source.contains("// Parent class Base properties"));
    assert!(source.contains("stream << type.a;"));
    assert!(source.contains("stream << type.b;"));
}

#[test]
fn multiple_explicit_inputs_are_processed_in_sorted_order() {
    let dir = TempDir::new().expect("temp dir");
    let base = write_fixture(
        dir.path(),
        "a_base.h",
        "CLASS()\nclass Base\n{\n    PROPERTY() int a;\n};\n",
    );
    let child = write_fixture(
        dir.path(),
        "b_child.h",
        "CLASS()\nclass Child : public Base\n{\n    PROPERTY() int b;\n};\n",
    );

    // Given in reverse; lexicographic ordering still parses the base first.
    build(&[child.to_string(), base.to_string()], &BuildOptions {
        quiet: true,
        ..Default::default()
    })
    .expect("build should succeed");

    assert!(dir.path().join("a_base_generated.cpp").exists());
    let source = fs::read_to_string(dir.path().join("b_child_generated.cpp")).expect("source");
    assert!(source.contains("// Parent class Base properties"));
}

#[test]
fn redeclaration_across_files_fails_second_file() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path(), "a.h", "CLASS()\nclass Foo\n{\n};\n");
    write_fixture(dir.path(), "b.h", "CLASS()\nclass Foo\n{\n};\n");

    let result = build(&[dir.path().to_str().unwrap().to_string()], &BuildOptions {
        quiet: true,
        ..Default::default()
    });
    assert!(result.is_err());

    assert!(dir.path().join("a_generated.h").exists());
    assert!(!dir.path().join("b_generated.h").exists());
}

#[test]
fn check_reports_errors_without_generating() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(
        dir.path(),
        "broken.h",
        "CLASS()\nclass Broken\n{\n    PROPERTY() int x;\n",
    );

    let result = check(&[dir.path().to_str().unwrap().to_string()]);
    assert!(result.is_err());
    assert!(!dir.path().join("broken_generated.h").exists());
}

#[test]
fn check_accepts_valid_files() {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path(), "scene.h", FIXTURE);
    check(&[dir.path().to_str().unwrap().to_string()]).expect("check should succeed");
}
