//! Groups per-file facts by fully-qualified package.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::indexer::FileFacts;

/// Facts of every file in one directory that declare the same package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub full_package: String,
    pub package_name: String,
    /// In the order the files were discovered
    pub files: Vec<PathBuf>,
    pub dependencies: BTreeMap<String, Vec<String>>,
    /// Union of the files' imports, first occurrence wins the position
    pub imports: Vec<String>,
}

impl PackageSummary {
    fn from_facts(facts: FileFacts) -> Self {
        let mut summary = Self {
            full_package: facts.full_package.clone(),
            package_name: facts.package_name.clone(),
            ..Self::default()
        };
        summary.merge(facts);
        summary
    }

    /// Additive merge: qualifiers present on both sides get the union of
    /// their symbols, never a replacement.
    pub fn merge(&mut self, facts: FileFacts) {
        debug_assert_eq!(facts.full_package, self.full_package);

        if !self.files.contains(&facts.source_path) {
            self.files.push(facts.source_path);
        }

        for (qualifier, symbols) in facts.dependencies {
            let merged = self.dependencies.entry(qualifier).or_default();
            for symbol in symbols {
                if !merged.contains(&symbol) {
                    merged.push(symbol);
                }
            }
        }

        for import in facts.imports {
            if !self.imports.contains(&import) {
                self.imports.push(import);
            }
        }

        if self.package_name.is_empty() {
            self.package_name = facts.package_name;
        }
    }
}

/// Folds file facts into one summary per distinct fully-qualified package.
#[derive(Debug, Default)]
pub struct PackageAggregator {
    summaries: BTreeMap<String, PackageSummary>,
}

impl PackageAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, facts: FileFacts) {
        match self.summaries.get_mut(&facts.full_package) {
            Some(summary) => summary.merge(facts),
            None => {
                let summary = PackageSummary::from_facts(facts);
                self.summaries.insert(summary.full_package.clone(), summary);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Summaries ordered by package key
    pub fn finish(self) -> Vec<PackageSummary> {
        self.summaries.into_values().collect()
    }
}

impl FromIterator<FileFacts> for PackageAggregator {
    fn from_iter<I: IntoIterator<Item = FileFacts>>(iter: I) -> Self {
        let mut aggregator = Self::new();
        for facts in iter {
            aggregator.add(facts);
        }
        aggregator
    }
}

pub fn aggregate(facts: impl IntoIterator<Item = FileFacts>) -> Vec<PackageSummary> {
    facts.into_iter().collect::<PackageAggregator>().finish()
}
