//! Turns package summaries into build units.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::generate::aggregator::PackageSummary;
use crate::label::TargetLabel;

/// Unit name used for default-package sources at the repository root.
pub const ROOT_UNIT_NAME: &str = "root";

/// A generated rule: one per package found in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildUnit {
    pub kind: String,
    pub name: String,
    pub source_files: Vec<PathBuf>,
    /// Qualifiers of referenced imports; symbol detail is dropped here
    pub raw_dependency_keys: BTreeSet<String>,
    /// Resolved deps, absent until resolution finds at least one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deps: Option<Vec<String>>,
}

impl BuildUnit {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            source_files: Vec::new(),
            raw_dependency_keys: BTreeSet::new(),
            deps: None,
        }
    }

    /// Absolute label of this unit inside `repo`, in the directory `pkg`.
    pub fn label(&self, repo: &str, pkg: &str) -> TargetLabel {
        TargetLabel::new(repo, pkg, self.name.clone())
    }

    /// Attaches `deps`, or removes the attribute when the list is empty.
    pub fn set_deps(&mut self, deps: Vec<String>) {
        self.deps = if deps.is_empty() { None } else { Some(deps) };
    }
}

/// Data produced at synthesis time for the indexing and resolve phases.
///
/// Travels next to its [`BuildUnit`] and never ends up in generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnitImports {
    /// Import keys under which the unit is indexed
    pub exported_packages: Vec<String>,
    /// Raw import strings to resolve into deps
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub unit: BuildUnit,
    pub imports: UnitImports,
}

/// Builds the unit for one summary. Returns `None` when the summary has no
/// files, since a unit without sources is never emitted.
///
/// `dir` is the slash-separated directory of the summary relative to the
/// repository root; its base name names units for the default package.
pub fn synthesize(summary: PackageSummary, dir: &str, rule_kind: &str) -> Option<GeneratedUnit> {
    if summary.files.is_empty() {
        return None;
    }

    let name = if summary.package_name.is_empty() {
        fallback_unit_name(dir)
    } else {
        summary.package_name
    };

    let mut unit = BuildUnit::new(rule_kind, name);
    unit.source_files = summary.files;
    unit.raw_dependency_keys = summary.dependencies.into_keys().collect();

    let exported_packages = if summary.full_package.is_empty() {
        Vec::new()
    } else {
        vec![summary.full_package]
    };

    Some(GeneratedUnit {
        unit,
        imports: UnitImports {
            exported_packages,
            imports: summary.imports,
        },
    })
}

/// Builds the units of one directory, with names unique within it.
pub fn synthesize_all(
    summaries: impl IntoIterator<Item = PackageSummary>,
    dir: &str,
    rule_kind: &str,
) -> Vec<GeneratedUnit> {
    let mut units: Vec<_> = summaries
        .into_iter()
        .filter_map(|summary| synthesize(summary, dir, rule_kind))
        .collect();
    disambiguate_names(&mut units, dir);
    units
}

/// Renames package units whose name is shared inside the directory to their
/// full package with `_` separators (`com.x.util` -> `com_x_util`). The
/// default-package unit keeps its name. Anything still clashing gets a
/// numeric suffix.
fn disambiguate_names(units: &mut [GeneratedUnit], dir: &str) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for generated in units.iter() {
        *counts.entry(generated.unit.name.clone()).or_default() += 1;
    }

    for generated in units.iter_mut() {
        if counts[&generated.unit.name] < 2 {
            continue;
        }
        if let Some(package) = generated.imports.exported_packages.first() {
            let renamed = package.replace('.', "_");
            tracing::warn!(
                "//{}: several units named {:?}, renaming {} to {:?}",
                dir,
                generated.unit.name,
                package,
                renamed
            );
            generated.unit.name = renamed;
        }
    }

    let mut seen = HashSet::new();
    for generated in units.iter_mut() {
        if seen.insert(generated.unit.name.clone()) {
            continue;
        }
        let base = generated.unit.name.clone();
        let mut n = 2;
        while !seen.insert(format!("{}_{}", base, n)) {
            n += 1;
        }
        generated.unit.name = format!("{}_{}", base, n);
        tracing::warn!("//{}: unit {:?} renamed to {:?}", dir, base, generated.unit.name);
    }
}

fn fallback_unit_name(dir: &str) -> String {
    dir.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(ROOT_UNIT_NAME)
        .to_string()
}
