use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use java_build_gen::build_file::{render_build_file, to_json};
use java_build_gen::config::GenerationConfig;
use java_build_gen::error::Result;
use java_build_gen::language::{BuildLanguage, JavaLanguage};
use java_build_gen::pipeline;

#[derive(Parser)]
#[command(name = "java-build-gen")]
#[command(about = "Generate java_library rules and their deps from Java sources")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Generate rules for the current directory tree
    java-build-gen generate

    # Treat every non-platform import as an external dependency
    java-build-gen generate ./src --no-index-libraries

    # Machine-readable output
    java-build-gen generate --format json

    # Show what was extracted from one file
    java-build-gen facts src/com/example/util/Strings.java
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate rules for every directory under a path
    Generate {
        /// Root of the source tree
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Config file (defaults to java-build-gen.toml in the root, if present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip the import index and guess deps from import strings
        #[arg(long)]
        no_index_libraries: bool,

        /// Name of the repository being generated
        #[arg(long)]
        repo: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "starlark")]
        format: OutputFormat,
    },

    /// Print the facts extracted from a single source file
    Facts {
        /// Source file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Starlark,
    Json,
}

pub fn generate(
    path: &Path,
    config_path: Option<&Path>,
    no_index_libraries: bool,
    repo: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = match config_path {
        Some(p) => GenerationConfig::load(p)?,
        None => GenerationConfig::discover(path)?,
    };
    if no_index_libraries {
        config.index_libraries = false;
    }
    if let Some(repo) = repo {
        config.repo_name = repo;
    }

    let language = JavaLanguage::new();
    let output = pipeline::run(&language, &config, path)?;

    match format {
        OutputFormat::Starlark => {
            for dir in &output.directories {
                let units: Vec<_> = dir.units.iter().map(|g| &g.unit).collect();
                println!("# //{}", dir.rel);
                println!("{}", render_build_file(&units));
            }
        }
        OutputFormat::Json => {
            println!("{}", to_json(&output.directories)?);
        }
    }

    for file in &output.unreadable {
        eprintln!("Warning: could not read {}", file.display());
    }
    for d in &output.diagnostics {
        eprintln!("Warning: {}: {}", d.unit, d.diagnostic);
    }
    eprintln!(
        "Generated {} {} rules in {} directories",
        output.unit_count(),
        language.name(),
        output.directories.len()
    );

    Ok(())
}

pub fn facts(file: &Path) -> Result<()> {
    let language = JavaLanguage::new();
    let mut extractor = language.new_extractor()?;

    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    let name = file.file_name().map(PathBuf::from).unwrap_or_else(|| file.to_path_buf());
    let facts = extractor.extract_file(dir, &name)?;

    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}
