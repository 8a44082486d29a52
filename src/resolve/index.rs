//! Lookup from import keys to the rules that provide them.

use std::collections::BTreeMap;

use crate::label::TargetLabel;

/// An import key in a given language, e.g. `("java", "com.example.model")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportSpec {
    pub lang: String,
    pub imp: String,
}

impl ImportSpec {
    pub fn new(lang: impl Into<String>, imp: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            imp: imp.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindResult {
    /// Absolute label of the providing rule
    pub label: TargetLabel,
}

/// Read-only view of rules indexed so far.
///
/// Only rules from directories the host already visited are present.
pub trait ImportIndex: Send + Sync {
    /// Rules indexed under `spec` by the language `lang`.
    fn find_rules_by_import(&self, spec: &ImportSpec, lang: &str) -> Vec<FindResult>;
}

#[derive(Debug, Clone)]
struct IndexedRule {
    label: TargetLabel,
    lang: String,
}

/// In-memory [`ImportIndex`] filled by the host while it walks the tree.
#[derive(Debug, Default)]
pub struct RuleIndex {
    by_import: BTreeMap<ImportSpec, Vec<IndexedRule>>,
    rule_count: usize,
}

impl RuleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `label` (absolute) under each of `specs`.
    pub fn add_rule(
        &mut self,
        label: TargetLabel,
        lang: &str,
        specs: impl IntoIterator<Item = ImportSpec>,
    ) {
        debug_assert!(!label.relative, "indexed labels must be absolute");
        self.rule_count += 1;

        for spec in specs {
            let rules = self.by_import.entry(spec).or_default();
            if !rules.iter().any(|r| r.label == label && r.lang == lang) {
                rules.push(IndexedRule {
                    label: label.clone(),
                    lang: lang.to_string(),
                });
            }
        }
    }

    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    pub fn import_count(&self) -> usize {
        self.by_import.len()
    }
}

impl ImportIndex for RuleIndex {
    fn find_rules_by_import(&self, spec: &ImportSpec, lang: &str) -> Vec<FindResult> {
        self.by_import
            .get(spec)
            .map(|rules| {
                rules
                    .iter()
                    .filter(|r| r.lang == lang)
                    .map(|r| FindResult {
                        label: r.label.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
