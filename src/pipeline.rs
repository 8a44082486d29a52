//! Whole-tree run: walk, generate, index, resolve.
//!
//! Every directory is generated and indexed before anything is resolved, so
//! resolution sees rules from the entire tree regardless of walk order.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::generate::{GenerateArgs, GeneratedUnit};
use crate::indexer::DirectoryWalker;
use crate::label::TargetLabel;
use crate::language::BuildLanguage;
use crate::resolve::{ResolveDiagnostic, RuleIndex};

/// Units generated for one directory.
#[derive(Debug, Clone)]
pub struct DirectoryUnits {
    /// Slash-separated path from the repository root
    pub rel: String,
    pub units: Vec<GeneratedUnit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDiagnostic {
    pub unit: TargetLabel,
    pub diagnostic: ResolveDiagnostic,
}

#[derive(Debug, Default)]
pub struct RepositoryOutput {
    /// Directories with at least one unit, in walk order
    pub directories: Vec<DirectoryUnits>,
    pub diagnostics: Vec<UnitDiagnostic>,
    /// Source files that could not be read
    pub unreadable: Vec<PathBuf>,
}

impl RepositoryOutput {
    pub fn unit_count(&self) -> usize {
        self.directories.iter().map(|d| d.units.len()).sum()
    }

    pub fn find(&self, rel: &str, name: &str) -> Option<&GeneratedUnit> {
        self.directories
            .iter()
            .find(|d| d.rel == rel)
            .and_then(|d| d.units.iter().find(|g| g.unit.name == name))
    }
}

pub fn run(
    language: &dyn BuildLanguage,
    config: &GenerationConfig,
    root: &Path,
) -> Result<RepositoryOutput> {
    let mut extractor = language.new_extractor()?;
    let listings = DirectoryWalker::new(config).walk(root)?;

    let mut index = RuleIndex::new();
    let mut output = RepositoryOutput::default();

    for listing in &listings {
        let args = GenerateArgs {
            config,
            dir: &listing.dir,
            rel: &listing.rel,
            regular_files: &listing.regular_files,
        };
        let result = language.generate_rules(&mut extractor, &args);

        for generated in &result.units {
            if let Some(specs) = language.imports(&generated.unit, &generated.imports) {
                index.add_rule(
                    generated.unit.label(&config.repo_name, &listing.rel),
                    language.name(),
                    specs,
                );
            }
        }

        output
            .unreadable
            .extend(result.unreadable.into_iter().map(|f| listing.dir.join(f)));
        if !result.units.is_empty() {
            output.directories.push(DirectoryUnits {
                rel: listing.rel.clone(),
                units: result.units,
            });
        }
    }

    tracing::info!(
        "Generated {} units in {} directories, {} import keys indexed",
        output.unit_count(),
        output.directories.len(),
        index.import_count()
    );

    output.diagnostics = output
        .directories
        .par_iter_mut()
        .flat_map_iter(|dir| {
            let mut found = Vec::new();
            for generated in &mut dir.units {
                let from = generated.unit.label(&config.repo_name, &dir.rel);
                let resolution = language.resolve(
                    config,
                    &index,
                    &mut generated.unit,
                    &generated.imports,
                    &from,
                );
                found.extend(resolution.diagnostics.into_iter().map(|diagnostic| {
                    UnitDiagnostic {
                        unit: from.clone(),
                        diagnostic,
                    }
                }));
            }
            found
        })
        .collect();

    if !output.diagnostics.is_empty() {
        tracing::info!(
            "{} imports could not be resolved; generated deps may need manual edits",
            output.diagnostics.len()
        );
    }

    Ok(output)
}
