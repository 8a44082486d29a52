//! Per-directory generation: file facts -> package summaries -> build units.

pub mod aggregator;
pub mod synthesizer;

pub use aggregator::{aggregate, PackageAggregator, PackageSummary};
pub use synthesizer::{synthesize, synthesize_all, BuildUnit, GeneratedUnit, UnitImports};

use std::path::{Path, PathBuf};

use crate::config::GenerationConfig;
use crate::error::BuildGenError;
use crate::indexer::{FactExtractor, FileFacts};

/// Input for one directory.
pub struct GenerateArgs<'a> {
    pub config: &'a GenerationConfig,
    /// Absolute or working-directory-relative path of the directory
    pub dir: &'a Path,
    /// Slash-separated path from the repository root, empty for the root
    pub rel: &'a str,
    /// Names of the regular files directly inside `dir`
    pub regular_files: &'a [String],
}

#[derive(Debug, Default)]
pub struct GenerateResult {
    pub units: Vec<GeneratedUnit>,
    /// Files skipped because they could not be read
    pub unreadable: Vec<PathBuf>,
}

/// Extracts every source file of a directory and builds one unit per package.
///
/// Per-file failures never stop the directory: an unreadable file is left out,
/// a file that fails to parse contributes empty facts.
pub fn generate_rules(extractor: &mut FactExtractor, args: &GenerateArgs<'_>) -> GenerateResult {
    let mut aggregator = PackageAggregator::new();
    let mut unreadable = Vec::new();

    for file_name in args.regular_files {
        if !args.config.is_source_file(file_name) {
            continue;
        }
        let file_name = Path::new(file_name);
        let full_path = args.dir.join(file_name);

        match extractor.extract_file(args.dir, file_name) {
            Ok(facts) => {
                if facts.has_syntax_errors {
                    tracing::warn!("{}: contains syntax errors", full_path.display());
                }
                aggregator.add(facts);
            }
            Err(BuildGenError::Io(e)) => {
                tracing::warn!("{}: could not be read: {}", full_path.display(), e);
                unreadable.push(file_name.to_path_buf());
            }
            Err(e) => {
                tracing::warn!("{}: {}", full_path.display(), e);
                aggregator.add(FileFacts::empty(file_name));
            }
        }
    }

    let units = synthesize_all(aggregator.finish(), args.rel, &args.config.rule_kind);
    tracing::debug!("//{}: generated {} units", args.rel, units.len());

    GenerateResult { units, unreadable }
}
