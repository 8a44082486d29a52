//! Hooks a build-file generator calls on a language.
//!
//! Hooks a language has no behaviour for return
//! [`BuildGenError::Unsupported`] so the caller can tell "nothing to do" from
//! "not available".

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::error::{BuildGenError, Result};
use crate::generate::{self, BuildUnit, GenerateArgs, GenerateResult, UnitImports};
use crate::indexer::FactExtractor;
use crate::label::TargetLabel;
use crate::languages::JavaGrammar;
use crate::resolve::{ImportIndex, ImportResolver, ImportSpec, Resolution};

/// How the generator treats the attributes of a rule kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub kind: &'static str,
    /// Attributes whose emptiness makes the rule empty
    pub non_empty_attrs: &'static [&'static str],
    /// Attributes the generator owns when merging
    pub mergeable_attrs: &'static [&'static str],
    /// Attributes filled by [`BuildLanguage::resolve`]
    pub resolve_attrs: &'static [&'static str],
}

pub trait BuildLanguage: Send + Sync {
    /// Language name, also the `lang` of every [`ImportSpec`] this language indexes.
    fn name(&self) -> &'static str;

    fn kinds(&self) -> &'static [KindInfo];

    /// A fresh extractor for one worker.
    fn new_extractor(&self) -> Result<FactExtractor>;

    /// Builds the units of one directory. Called once per directory in
    /// depth-first post-order.
    fn generate_rules(&self, extractor: &mut FactExtractor, args: &GenerateArgs<'_>)
        -> GenerateResult;

    /// Import keys under which `unit` is indexed. `None` leaves the unit out of
    /// the index; an empty list indexes it with no keys.
    fn imports(&self, unit: &BuildUnit, imports: &UnitImports) -> Option<Vec<ImportSpec>>;

    /// Sets the `deps` of `unit` from its imports.
    fn resolve(
        &self,
        config: &GenerationConfig,
        index: &dyn ImportIndex,
        unit: &mut BuildUnit,
        imports: &UnitImports,
        from: &TargetLabel,
    ) -> Resolution;

    /// Labels of rules embedded by `unit`.
    fn embeds(&self, _unit: &BuildUnit, _from: &TargetLabel) -> Result<Vec<TargetLabel>> {
        Err(BuildGenError::Unsupported("embeds"))
    }

    /// Rewrites deprecated usage in existing units.
    fn fix(&self, _units: &mut [BuildUnit]) -> Result<()> {
        Err(BuildGenError::Unsupported("fix"))
    }

    /// `.bzl` files that define the generated kinds.
    fn loads(&self) -> Result<Vec<String>> {
        Err(BuildGenError::Unsupported("loads"))
    }
}

pub const JAVA_LIBRARY: KindInfo = KindInfo {
    kind: "java_library",
    non_empty_attrs: &["srcs", "deps"],
    mergeable_attrs: &["srcs"],
    resolve_attrs: &["deps", "runtime_deps"],
};

const JAVA_KINDS: &[KindInfo] = &[JAVA_LIBRARY];

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaLanguage;

impl JavaLanguage {
    pub fn new() -> Self {
        Self
    }

    fn handles_kind(&self, kind: &str) -> bool {
        self.kinds().iter().any(|k| k.kind == kind)
    }
}

impl BuildLanguage for JavaLanguage {
    fn name(&self) -> &'static str {
        "java"
    }

    fn kinds(&self) -> &'static [KindInfo] {
        JAVA_KINDS
    }

    fn new_extractor(&self) -> Result<FactExtractor> {
        FactExtractor::new(Arc::new(JavaGrammar))
    }

    fn generate_rules(
        &self,
        extractor: &mut FactExtractor,
        args: &GenerateArgs<'_>,
    ) -> GenerateResult {
        generate::generate_rules(extractor, args)
    }

    fn imports(&self, unit: &BuildUnit, imports: &UnitImports) -> Option<Vec<ImportSpec>> {
        if !self.handles_kind(&unit.kind) {
            return None;
        }
        Some(
            imports
                .exported_packages
                .iter()
                .map(|pkg| ImportSpec::new(self.name(), pkg.clone()))
                .collect(),
        )
    }

    fn resolve(
        &self,
        config: &GenerationConfig,
        index: &dyn ImportIndex,
        unit: &mut BuildUnit,
        imports: &UnitImports,
        from: &TargetLabel,
    ) -> Resolution {
        unit.deps = None;
        if imports.imports.is_empty() {
            tracing::debug!("{}: no imports", from);
            return Resolution::default();
        }

        let resolution =
            ImportResolver::new(config, self.name()).resolve(index, from, &imports.imports);
        unit.set_deps(resolution.deps.clone());
        resolution
    }

    /// Nothing to rewrite for `java_library`.
    fn fix(&self, _units: &mut [BuildUnit]) -> Result<()> {
        Ok(())
    }

    /// `java_library` is native, no load statements needed.
    fn loads(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}
