//! Import resolution: raw import strings -> `deps` labels.
//!
//! For each import of a unit:
//! - platform imports (`java.` by default) are dropped;
//! - the import is parsed as a label and made absolute against the unit;
//! - labels in another repository, or any import when indexing is disabled,
//!   take a literal guess: the import minus the source extension;
//! - everything else is looked up in the [`ImportIndex`] under the import
//!   itself and then its package, and every match is written relative to the
//!   unit. Parent packages are never tried.

use std::collections::BTreeSet;
use std::fmt;

use crate::config::GenerationConfig;
use crate::error::BuildGenError;
use crate::label::TargetLabel;
use crate::resolve::index::{ImportIndex, ImportSpec};

/// Non-fatal problems found while resolving one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveDiagnostic {
    /// The import is not label-shaped
    InvalidImport { import: String, reason: String },
    /// No indexed rule provides the import
    Unresolved { import: String, label: String },
}

impl fmt::Display for ResolveDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveDiagnostic::InvalidImport { import, reason } => {
                write!(f, "import of {:?} is invalid: {}", import, reason)
            }
            ResolveDiagnostic::Unresolved { import, label } => write!(
                f,
                "{:?} ({}) was not found in dependency index. Skipping. This may result in an \
                 incomplete deps section and require manual BUILD file intervention.",
                import, label
            ),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Sorted, without duplicates
    pub deps: Vec<String>,
    pub diagnostics: Vec<ResolveDiagnostic>,
}

pub struct ImportResolver<'a> {
    config: &'a GenerationConfig,
    lang: &'a str,
}

impl<'a> ImportResolver<'a> {
    pub fn new(config: &'a GenerationConfig, lang: &'a str) -> Self {
        Self { config, lang }
    }

    /// Resolves `imports` for the unit at absolute label `from`.
    pub fn resolve(
        &self,
        index: &dyn ImportIndex,
        from: &TargetLabel,
        imports: &[String],
    ) -> Resolution {
        let mut deps = BTreeSet::new();
        let mut diagnostics = Vec::new();

        for import in imports {
            if let Err(diagnostic) = self.resolve_import(index, from, import, &mut deps) {
                tracing::warn!("{}: {}", from, diagnostic);
                diagnostics.push(diagnostic);
            }
        }

        Resolution {
            deps: deps.into_iter().collect(),
            diagnostics,
        }
    }

    fn resolve_import(
        &self,
        index: &dyn ImportIndex,
        from: &TargetLabel,
        import: &str,
        deps: &mut BTreeSet<String>,
    ) -> Result<(), ResolveDiagnostic> {
        if self.config.is_builtin(import) {
            tracing::debug!("{}: skipping built-in import {:?}", from, import);
            return Ok(());
        }

        let label = TargetLabel::parse(import)
            .map_err(|e| ResolveDiagnostic::InvalidImport {
                import: import.to_string(),
                reason: match e {
                    BuildGenError::LabelParse { reason, .. } => reason,
                    other => other.to_string(),
                },
            })?
            .to_absolute(&from.repo, &from.pkg);

        if label.repo != from.repo || !self.config.index_libraries {
            let guess = import
                .strip_suffix(self.config.source_extension.as_str())
                .unwrap_or(import);
            deps.insert(guess.to_string());
            return Ok(());
        }

        let mut found = false;
        for key in import_keys(import) {
            let matches = self.index_lookup(index, key);
            if matches.is_empty() {
                continue;
            }
            found = true;
            for matched in matches {
                if matched == *from {
                    tracing::debug!("{}: ignoring self import {:?}", from, import);
                    continue;
                }
                deps.insert(matched.to_relative(&from.repo, &from.pkg).to_string());
            }
            break;
        }

        if found {
            Ok(())
        } else {
            Err(ResolveDiagnostic::Unresolved {
                import: import.to_string(),
                label: label.to_string(),
            })
        }
    }

    fn index_lookup(&self, index: &dyn ImportIndex, key: &str) -> Vec<TargetLabel> {
        index
            .find_rules_by_import(&ImportSpec::new(self.lang, key), self.lang)
            .into_iter()
            .map(|m| m.label)
            .collect()
    }
}

/// Keys to try for an import, most specific first: the import itself, then
/// its package. `a.b.C.D` gives `a.b.C.D`, `a.b`; `a.b.*` gives `a.b`.
fn import_keys(import: &str) -> Vec<&str> {
    let (base, wildcard) = match import.strip_suffix(".*") {
        Some(base) => (base, true),
        None => (import, false),
    };

    let mut keys = Vec::with_capacity(2);
    if !wildcard {
        keys.push(base);
    }
    if let Some(package) = package_of(base, wildcard) {
        if !keys.contains(&package) {
            keys.push(package);
        }
    }
    keys.retain(|key| !key.is_empty());
    keys
}

/// Package part of a dotted name: the segments before the first capitalized
/// one. Without a capitalized segment a wildcard base is itself a package,
/// otherwise the last segment is dropped.
fn package_of(base: &str, wildcard: bool) -> Option<&str> {
    let mut offset = 0;
    for (i, segment) in base.split('.').enumerate() {
        if segment.starts_with(|c: char| c.is_uppercase()) {
            return (i > 0).then(|| &base[..offset - 1]);
        }
        offset += segment.len() + 1;
    }
    if wildcard {
        Some(base)
    } else {
        base.rsplit_once('.').map(|(prefix, _)| prefix)
    }
}
