//! Integration tests for per-directory generation.
//!
//! These tests write small Java packages to a temp directory and check the
//! units produced from them.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use java_build_gen::generate::{generate_rules, GenerateArgs};
use java_build_gen::{FactExtractor, GenerationConfig};

// ============================================================================
// Test Helpers
// ============================================================================

fn write_files(dir: &Path, files: &[(&str, &str)]) -> Vec<String> {
    for (name, content) in files {
        std::fs::write(dir.join(name), content).expect("Failed to write source file");
    }
    files.iter().map(|(name, _)| name.to_string()).collect()
}

fn run_generate(dir: &Path, rel: &str, files: &[String]) -> java_build_gen::GenerateResult {
    let config = GenerationConfig::default();
    let mut extractor = FactExtractor::java().expect("Failed to create extractor");
    generate_rules(
        &mut extractor,
        &GenerateArgs {
            config: &config,
            dir,
            rel,
            regular_files: files,
        },
    )
}

const A_JAVA: &str = r#"
package com.example.util;

import com.example.model.Widget;

public class A {
    private final Widget widget = new Widget();
}
"#;

const B_JAVA: &str = r#"
package com.example.util;

public class B {
    int count;
}
"#;

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_two_files_one_package() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(temp_dir.path(), &[("A.java", A_JAVA), ("B.java", B_JAVA)]);

    let result = run_generate(temp_dir.path(), "com/example/util", &files);

    assert_eq!(result.units.len(), 1);
    let generated = &result.units[0];
    assert_eq!(generated.unit.name, "util");
    assert_eq!(generated.unit.kind, "java_library");
    assert_eq!(
        generated.unit.source_files,
        vec![PathBuf::from("A.java"), PathBuf::from("B.java")]
    );
    assert_eq!(
        generated.unit.raw_dependency_keys.iter().collect::<Vec<_>>(),
        vec!["com.example.model"]
    );
    assert_eq!(generated.unit.deps, None);
    assert_eq!(generated.imports.exported_packages, vec!["com.example.util"]);
    assert_eq!(generated.imports.imports, vec!["com.example.model.Widget"]);
}

#[test]
fn test_source_order_follows_listing() {
    let temp_dir = TempDir::new().unwrap();
    write_files(temp_dir.path(), &[("A.java", A_JAVA), ("B.java", B_JAVA)]);
    let listing = vec!["B.java".to_string(), "A.java".to_string()];

    let result = run_generate(temp_dir.path(), "com/example/util", &listing);

    assert_eq!(
        result.units[0].unit.source_files,
        vec![PathBuf::from("B.java"), PathBuf::from("A.java")]
    );
}

#[test]
fn test_two_packages_in_one_directory() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(
        temp_dir.path(),
        &[
            ("A.java", A_JAVA),
            ("Other.java", "package com.example.other;\nclass Other {}\n"),
        ],
    );

    let result = run_generate(temp_dir.path(), "mixed", &files);

    let names: Vec<_> = result.units.iter().map(|g| g.unit.name.as_str()).collect();
    assert_eq!(names, vec!["other", "util"]);
}

#[test]
fn test_non_source_files_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(
        temp_dir.path(),
        &[("A.java", A_JAVA), ("BUILD", ""), ("notes.txt", "package x;")],
    );

    let result = run_generate(temp_dir.path(), "com/example/util", &files);

    assert_eq!(result.units.len(), 1);
    assert_eq!(result.units[0].unit.source_files, vec![PathBuf::from("A.java")]);
}

#[test]
fn test_no_sources_no_units() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(temp_dir.path(), &[("README.md", "# docs")]);

    let result = run_generate(temp_dir.path(), "docs", &files);

    assert!(result.units.is_empty());
}

#[test]
fn test_syntax_error_does_not_block_directory() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(
        temp_dir.path(),
        &[
            ("A.java", A_JAVA),
            ("Broken.java", "package com.example.util;\nclass Broken { void f( {"),
        ],
    );

    let result = run_generate(temp_dir.path(), "com/example/util", &files);

    assert_eq!(result.units.len(), 1);
    assert_eq!(
        result.units[0].unit.source_files,
        vec![PathBuf::from("A.java"), PathBuf::from("Broken.java")]
    );
}

#[test]
fn test_unreadable_file_is_excluded() {
    let temp_dir = TempDir::new().unwrap();
    let mut files = write_files(temp_dir.path(), &[("A.java", A_JAVA)]);
    files.push("Missing.java".to_string());

    let result = run_generate(temp_dir.path(), "com/example/util", &files);

    assert_eq!(result.units.len(), 1);
    assert_eq!(result.units[0].unit.source_files, vec![PathBuf::from("A.java")]);
    assert_eq!(result.unreadable, vec![PathBuf::from("Missing.java")]);
}

#[test]
fn test_default_package_named_after_directory() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(temp_dir.path(), &[("Main.java", "class Main {}\n")]);

    let result = run_generate(temp_dir.path(), "tools/launcher", &files);

    assert_eq!(result.units[0].unit.name, "launcher");
    assert!(result.units[0].imports.exported_packages.is_empty());
}

#[test]
fn test_unit_names_unique_within_directory() {
    let temp_dir = TempDir::new().unwrap();
    let files = write_files(
        temp_dir.path(),
        &[
            ("X.java", "package com.x.util;\nclass X {}\n"),
            ("Y.java", "package org.y.util;\nclass Y {}\n"),
            ("Main.java", "class Main {}\n"),
        ],
    );

    let result = run_generate(temp_dir.path(), "util", &files);

    let names: Vec<_> = result.units.iter().map(|g| g.unit.name.as_str()).collect();
    assert_eq!(names, vec!["util", "com_x_util", "org_y_util"]);
}
