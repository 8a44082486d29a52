use super::LanguageGrammar;

pub struct JavaGrammar;

impl LanguageGrammar for JavaGrammar {
    fn name(&self) -> &'static str {
        "java"
    }

    fn file_extensions(&self) -> &[&'static str] {
        &["java"]
    }

    fn language(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn analysis_query(&self) -> &'static str {
        include_str!("queries/java.scm")
    }

    fn identifier_kind(&self) -> &'static str {
        "identifier"
    }

    fn scoped_name_kind(&self) -> &'static str {
        "scoped_identifier"
    }

    fn wildcard_kind(&self) -> &'static str {
        "asterisk"
    }
}
