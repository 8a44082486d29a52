//! Integration tests for whole-tree generation and dependency resolution.

use std::path::Path;

use tempfile::TempDir;

use java_build_gen::pipeline;
use java_build_gen::{
    GenerationConfig, ImportResolver, JavaLanguage, ResolveDiagnostic, RuleIndex, TargetLabel,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn create_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A small repository: `util` uses `model`, `app` uses both plus a third-party
/// library and the JDK.
fn create_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    create_file(
        root,
        "com/example/model/Widget.java",
        "package com.example.model;\n\npublic class Widget {}\n",
    );
    create_file(
        root,
        "com/example/util/A.java",
        r#"
package com.example.util;

import com.example.model.Widget;

public class A {
    Widget widget;
}
"#,
    );
    create_file(
        root,
        "com/example/util/B.java",
        "package com.example.util;\n\npublic class B {}\n",
    );
    create_file(
        root,
        "com/example/app/App.java",
        r#"
package com.example.app;

import java.util.List;
import com.example.model.Widget;
import org.external.Thing;
import com.example.util.A;

public class App {
    List<Widget> widgets;
    A a;
    Thing thing;
}
"#,
    );

    temp_dir
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_generate_and_resolve_repository() {
    let repo = create_repo();
    let config = GenerationConfig::default();

    let output = pipeline::run(&JavaLanguage::new(), &config, repo.path()).unwrap();

    assert_eq!(output.unit_count(), 3);

    let util = output.find("com/example/util", "util").unwrap();
    assert_eq!(util.unit.deps, Some(vec!["//com/example/model".to_string()]));

    let model = output.find("com/example/model", "model").unwrap();
    assert_eq!(model.unit.deps, None);

    let app = output.find("com/example/app", "app").unwrap();
    assert_eq!(
        app.unit.deps,
        Some(vec![
            "//com/example/model".to_string(),
            "//com/example/util".to_string(),
        ])
    );

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics[0].unit,
        TargetLabel::new("", "com/example/app", "app")
    );
    assert!(matches!(
        &output.diagnostics[0].diagnostic,
        ResolveDiagnostic::Unresolved { import, .. } if import == "org.external.Thing"
    ));
}

#[test]
fn test_post_order_directories() {
    let repo = create_repo();
    let config = GenerationConfig::default();

    let output = pipeline::run(&JavaLanguage::new(), &config, repo.path()).unwrap();

    let rels: Vec<_> = output.directories.iter().map(|d| d.rel.as_str()).collect();
    assert_eq!(
        rels,
        vec!["com/example/app", "com/example/model", "com/example/util"]
    );
}

#[test]
fn test_index_libraries_disabled_uses_literal_fallback() {
    let repo = create_repo();
    let config = GenerationConfig {
        index_libraries: false,
        ..GenerationConfig::default()
    };

    let output = pipeline::run(&JavaLanguage::new(), &config, repo.path()).unwrap();

    let app = output.find("com/example/app", "app").unwrap();
    assert_eq!(
        app.unit.deps,
        Some(vec![
            "com.example.model.Widget".to_string(),
            "com.example.util.A".to_string(),
            "org.external.Thing".to_string(),
        ])
    );
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_config_file_is_discovered() {
    let repo = create_repo();
    create_file(repo.path(), "java-build-gen.toml", "index_libraries = false\n");

    let config = GenerationConfig::discover(repo.path()).unwrap();
    let output = pipeline::run(&JavaLanguage::new(), &config, repo.path()).unwrap();

    let util = output.find("com/example/util", "util").unwrap();
    assert_eq!(util.unit.deps, Some(vec!["com.example.model.Widget".to_string()]));
}

#[test]
fn test_named_repository_labels() {
    let repo = create_repo();
    let config = GenerationConfig {
        repo_name: "main".to_string(),
        ..GenerationConfig::default()
    };

    let output = pipeline::run(&JavaLanguage::new(), &config, repo.path()).unwrap();

    let util = output.find("com/example/util", "util").unwrap();
    assert_eq!(util.unit.deps, Some(vec!["//com/example/model".to_string()]));
}

#[test]
fn test_missing_root_is_an_error() {
    let config = GenerationConfig::default();
    assert!(pipeline::run(&JavaLanguage::new(), &config, Path::new("/nonexistent/repo")).is_err());
}

#[test]
fn test_builtin_import_skipped_regardless_of_index() {
    let config = GenerationConfig::default();
    let mut index = RuleIndex::new();
    index.add_rule(
        TargetLabel::new("", "java/util", "util"),
        "java",
        [java_build_gen::ImportSpec::new("java", "java.util")],
    );

    let resolution = ImportResolver::new(&config, "java").resolve(
        &index,
        &TargetLabel::new("", "com/example/util", "util"),
        &["java.util.List".to_string()],
    );

    assert!(resolution.deps.is_empty());
    assert!(resolution.diagnostics.is_empty());
}

#[test]
fn test_starlark_output() {
    let repo = create_repo();
    let config = GenerationConfig::default();
    let output = pipeline::run(&JavaLanguage::new(), &config, repo.path()).unwrap();

    let util = output.find("com/example/util", "util").unwrap();
    let text = java_build_gen::build_file::render_unit(&util.unit);

    assert_eq!(
        text,
        r#"java_library(
    name = "util",
    srcs = [
        "A.java",
        "B.java",
    ],
    deps = ["//com/example/model"],
)
"#
    );
}

#[test]
fn test_missing_subpackage_does_not_bind_to_parent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "com/example/App.java", "package com.example;\nclass App {}\n");
    create_file(
        root,
        "com/example/util/U.java",
        "package com.example.util;\n\nimport com.example.missing.Thing;\n\nclass U { Thing t; }\n",
    );

    let output =
        pipeline::run(&JavaLanguage::new(), &GenerationConfig::default(), root).unwrap();

    let util = output.find("com/example/util", "util").unwrap();
    assert_eq!(util.unit.deps, None);
    assert_eq!(output.diagnostics.len(), 1);
    assert!(matches!(
        &output.diagnostics[0].diagnostic,
        ResolveDiagnostic::Unresolved { import, .. } if import == "com.example.missing.Thing"
    ));
}
