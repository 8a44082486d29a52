//! Text and JSON forms of generated units.

use serde::Serialize;

use crate::generate::BuildUnit;
use crate::pipeline::DirectoryUnits;

/// Renders one unit as a Starlark rule call.
pub fn render_unit(unit: &BuildUnit) -> String {
    let mut out = format!("{}(\n", unit.kind);
    out.push_str(&format!("    name = {},\n", quote(&unit.name)));

    let srcs: Vec<String> = unit
        .source_files
        .iter()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();
    render_list(&mut out, "srcs", &srcs);

    if let Some(deps) = &unit.deps {
        render_list(&mut out, "deps", deps);
    }

    out.push_str(")\n");
    out
}

/// Renders the units of one directory as the body of a BUILD file.
pub fn render_build_file(units: &[&BuildUnit]) -> String {
    units
        .iter()
        .map(|unit| render_unit(unit))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_list(out: &mut String, attr: &str, values: &[String]) {
    match values {
        [] => {}
        [single] => out.push_str(&format!("    {} = [{}],\n", attr, quote(single))),
        _ => {
            out.push_str(&format!("    {} = [\n", attr));
            for value in values {
                out.push_str(&format!("        {},\n", quote(value)));
            }
            out.push_str("    ],\n");
        }
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[derive(Debug, Serialize)]
pub struct JsonDirectory<'a> {
    pub package: &'a str,
    pub units: Vec<&'a BuildUnit>,
}

pub fn to_json(directories: &[DirectoryUnits]) -> serde_json::Result<String> {
    let dirs: Vec<JsonDirectory<'_>> = directories
        .iter()
        .map(|d| JsonDirectory {
            package: &d.rel,
            units: d.units.iter().map(|g| &g.unit).collect(),
        })
        .collect();
    serde_json::to_string_pretty(&dirs)
}
