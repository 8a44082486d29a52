use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tree_sitter::{Node, Query, QueryCursor, StreamingIterator};

use crate::error::{BuildGenError, Result};
use crate::indexer::parser::Parser;
use crate::languages::{
    JavaGrammar, LanguageGrammar, CLASS_NAME, FULL_IMPORT, FULL_PACKAGE, LOCAL_PACKAGE,
};

/// Facts extracted from a single source file.
///
/// For
/// ```text
/// package a.b.c;
/// import x.y.Widget;
/// class C { Widget w; }
/// ```
/// this is `{ package_name: "c", full_package: "a.b.c", imports: ["x.y.Widget"],
/// dependencies: { "x.y": ["Widget"] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileFacts {
    /// Last segment of the declared package
    pub package_name: String,
    pub full_package: String,
    /// Bare import paths in source order
    pub imports: Vec<String>,
    /// Qualifier -> referenced symbols
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub source_path: PathBuf,
    pub has_syntax_errors: bool,
}

impl FileFacts {
    /// Zero-value facts for a file that could not be analyzed.
    pub fn empty(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    /// Only the most recent import is considered. A reference to `Widget` right
    /// after `import x.y.Widget` records `Widget` under `x.y`.
    fn record_reference(&mut self, class_name: &str) {
        let Some(last) = self.imports.last() else {
            return;
        };
        let Some(qualifier) = last
            .strip_suffix(class_name)
            .and_then(|prefix| prefix.strip_suffix('.'))
        else {
            return;
        };
        if qualifier.is_empty() {
            return;
        }

        let symbols = self.dependencies.entry(qualifier.to_string()).or_default();
        if !symbols.iter().any(|s| s == class_name) {
            symbols.push(class_name.to_string());
        }
    }
}

/// Runs the analysis query over parsed files.
///
/// Owns its parser and compiled query; create one per worker thread.
pub struct FactExtractor {
    parser: Parser,
    query: Query,
}

impl FactExtractor {
    pub fn new(grammar: Arc<dyn LanguageGrammar>) -> Result<Self> {
        let query = Query::new(&grammar.language(), grammar.analysis_query())
            .map_err(|e| BuildGenError::QueryInit(format!("Invalid analysis query: {}", e)))?;
        let parser = Parser::new(grammar)?;

        Ok(Self { parser, query })
    }

    pub fn java() -> Result<Self> {
        Self::new(Arc::new(JavaGrammar))
    }

    /// Reads `dir/file_name` and extracts its facts. The recorded source path
    /// is `file_name` as given.
    pub fn extract_file(&mut self, dir: &Path, file_name: &Path) -> Result<FileFacts> {
        let source = std::fs::read(dir.join(file_name))?;
        self.extract_source(source, file_name)
    }

    pub fn extract_source(
        &mut self,
        source: impl Into<Vec<u8>>,
        source_path: impl Into<PathBuf>,
    ) -> Result<FileFacts> {
        let parsed = self.parser.parse_source(source)?;
        let grammar = self.parser.grammar().clone();
        let source = parsed.source_bytes();

        let mut facts = FileFacts::empty(source_path);
        facts.has_syntax_errors = parsed.has_syntax_errors();

        let capture_names = self.query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(&self.query, parsed.root_node(), source);

        while let Some((m, capture_index)) = captures.next() {
            let capture = m.captures[*capture_index];
            let text = parsed.node_text(&capture.node);

            match capture_names[capture.index as usize] {
                FULL_PACKAGE => {
                    facts.full_package =
                        declared_path(grammar.as_ref(), capture.node, source).unwrap_or_default();
                }
                LOCAL_PACKAGE => {
                    facts.package_name = text.to_string();
                }
                FULL_IMPORT => match declared_path(grammar.as_ref(), capture.node, source) {
                    Some(path) => facts.imports.push(path),
                    None => tracing::debug!(
                        "{}: import without a name: {:?}",
                        facts.source_path.display(),
                        text
                    ),
                },
                CLASS_NAME => {
                    facts.record_reference(text);
                }
                _ => {}
            }
        }

        tracing::debug!(
            "{}: package {:?}, {} imports, {} qualifiers",
            facts.source_path.display(),
            facts.full_package,
            facts.imports.len(),
            facts.dependencies.len()
        );
        Ok(facts)
    }
}

/// Dotted path named by a package or import declaration, built from its name
/// nodes so annotations, `static`, whitespace and comments never leak in.
/// A wildcard import keeps its `.*`.
fn declared_path(
    grammar: &dyn LanguageGrammar,
    declaration: Node,
    source: &[u8],
) -> Option<String> {
    let mut cursor = declaration.walk();
    let mut path = None;
    let mut wildcard = false;

    for child in declaration.named_children(&mut cursor) {
        let kind = child.kind();
        let is_name = kind == grammar.identifier_kind() || kind == grammar.scoped_name_kind();
        if path.is_none() && is_name {
            path = dotted_name(grammar, child, source);
        } else if kind == grammar.wildcard_kind() {
            wildcard = true;
        }
    }

    path.map(|p| if wildcard { format!("{}.*", p) } else { p })
}

fn dotted_name(grammar: &dyn LanguageGrammar, node: Node, source: &[u8]) -> Option<String> {
    let kind = node.kind();
    if kind == grammar.identifier_kind() {
        return node.utf8_text(source).ok().map(str::to_string);
    }
    if kind != grammar.scoped_name_kind() {
        return None;
    }

    let scope = dotted_name(grammar, node.child_by_field_name("scope")?, source)?;
    let name = node.child_by_field_name("name")?.utf8_text(source).ok()?;
    Some(format!("{}.{}", scope, name))
}
