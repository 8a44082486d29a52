use std::path::Path;
use std::sync::Arc;

use crate::error::{BuildGenError, Result};
use crate::languages::LanguageGrammar;

/// Reusable tree-sitter parse context for one grammar.
///
/// Holds mutable parser state, so each worker owns its own instance.
pub struct Parser {
    inner: tree_sitter::Parser,
    grammar: Arc<dyn LanguageGrammar>,
}

impl Parser {
    pub fn new(grammar: Arc<dyn LanguageGrammar>) -> Result<Self> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&grammar.language())
            .map_err(|e| BuildGenError::QueryInit(e.to_string()))?;

        Ok(Self { inner, grammar })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let source = std::fs::read(path)?;
        self.parse_source(source)
    }

    pub fn parse_source(&mut self, source: impl Into<Vec<u8>>) -> Result<ParsedFile> {
        let source = source.into();
        let tree = self
            .inner
            .parse(&source, None)
            .ok_or_else(|| BuildGenError::Parse("Failed to parse source".to_string()))?;

        Ok(ParsedFile { tree, source })
    }

    pub fn grammar(&self) -> &Arc<dyn LanguageGrammar> {
        &self.grammar
    }
}

pub struct ParsedFile {
    pub tree: tree_sitter::Tree,
    pub source: Vec<u8>,
}

impl ParsedFile {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        &self.source
    }

    pub fn node_text(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source_bytes()).unwrap_or("")
    }

    /// True when the tree contains ERROR or MISSING nodes.
    pub fn has_syntax_errors(&self) -> bool {
        self.root_node().has_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::JavaGrammar;
    use std::io::Write;

    fn create_parser() -> Parser {
        Parser::new(Arc::new(JavaGrammar)).unwrap()
    }

    #[test]
    fn test_parse_java_class() {
        let mut parser = create_parser();
        let source = r#"
package com.example;

public class Calculator {
    public int add(int a, int b) {
        return a + b;
    }
}
"#;

        let parsed = parser.parse_source(source).unwrap();
        let root = parsed.root_node();

        assert_eq!(root.kind(), "program");
        assert!(root.child_count() > 0);
        assert!(!parsed.has_syntax_errors());
    }

    #[test]
    fn test_parse_source_empty() {
        let mut parser = create_parser();
        let parsed = parser.parse_source("").unwrap();
        assert!(parsed.source.is_empty());
        assert!(!parsed.has_syntax_errors());
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        let mut parser = create_parser();
        let parsed = parser.parse_source("package com.example;\nclass {{{").unwrap();
        assert!(parsed.has_syntax_errors());
    }

    #[test]
    fn test_parser_is_reusable() {
        let mut parser = create_parser();
        let first = parser.parse_source("class A {}").unwrap();
        let second = parser.parse_source("class B {}").unwrap();
        assert_eq!(first.node_text(&first.root_node()), "class A {}");
        assert_eq!(second.node_text(&second.root_node()), "class B {}");
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"package a.b;").unwrap();

        let mut parser = create_parser();
        let parsed = parser.parse_file(file.path()).unwrap();
        assert_eq!(parsed.source_bytes(), b"package a.b;");
    }

    #[test]
    fn test_parse_missing_file() {
        let mut parser = create_parser();
        let err = parser.parse_file(Path::new("/nonexistent/Missing.java")).err().unwrap();
        assert!(matches!(err, BuildGenError::Io(_)));
    }

    #[test]
    fn test_parser_grammar() {
        let parser = create_parser();
        assert_eq!(parser.grammar().name(), "java");
    }
}
