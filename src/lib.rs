pub mod build_file;
pub mod config;
pub mod error;
pub mod generate;
pub mod indexer;
pub mod label;
pub mod language;
pub mod languages;
pub mod pipeline;
pub mod resolve;

pub use config::GenerationConfig;
pub use error::{BuildGenError, Result};
pub use generate::{
    aggregate, synthesize, BuildUnit, GenerateArgs, GenerateResult, GeneratedUnit,
    PackageAggregator, PackageSummary, UnitImports,
};
pub use indexer::{DirectoryListing, DirectoryWalker, FactExtractor, FileFacts};
pub use label::TargetLabel;
pub use language::{BuildLanguage, JavaLanguage, KindInfo};
pub use languages::{JavaGrammar, LanguageGrammar};
pub use pipeline::{DirectoryUnits, RepositoryOutput, UnitDiagnostic};
pub use resolve::{
    FindResult, ImportIndex, ImportResolver, ImportSpec, Resolution, ResolveDiagnostic, RuleIndex,
};
