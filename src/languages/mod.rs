pub mod java;

pub use java::JavaGrammar;

use std::path::Path;

/// Capture names the analysis query must define.
pub const FULL_PACKAGE: &str = "full_package";
pub const LOCAL_PACKAGE: &str = "local_package";
pub const FULL_IMPORT: &str = "full_import";
pub const CLASS_NAME: &str = "class_name";

pub const CAPTURE_NAMES: [&str; 4] = [FULL_PACKAGE, LOCAL_PACKAGE, FULL_IMPORT, CLASS_NAME];

pub trait LanguageGrammar: Send + Sync {
    fn name(&self) -> &'static str;
    fn file_extensions(&self) -> &[&'static str];
    fn language(&self) -> tree_sitter::Language;

    /// Query producing the `full_package`, `local_package`, `full_import` and
    /// `class_name` captures.
    fn analysis_query(&self) -> &'static str;

    /// Node kind of a single name segment
    fn identifier_kind(&self) -> &'static str;

    /// Node kind of a qualified name, with `scope` and `name` fields
    fn scoped_name_kind(&self) -> &'static str;

    /// Node kind of the `*` in a wildcard import
    fn wildcard_kind(&self) -> &'static str;

    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.file_extensions().contains(&ext))
    }
}
