use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config::GenerationConfig;
use crate::error::Result;

/// One directory and the regular files directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub dir: PathBuf,
    /// Slash-separated path from the walk root, empty for the root itself
    pub rel: String,
    /// File names, sorted
    pub regular_files: Vec<String>,
}

/// Lists directories depth-first, children before their parent.
pub struct DirectoryWalker<'a> {
    config: &'a GenerationConfig,
}

impl<'a> DirectoryWalker<'a> {
    pub fn new(config: &'a GenerationConfig) -> Self {
        Self { config }
    }

    pub fn walk(&self, root: &Path) -> Result<Vec<DirectoryListing>> {
        if !root.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a directory", root.display()),
            )
            .into());
        }

        let mut pending: HashMap<PathBuf, Vec<String>> = HashMap::new();
        let mut listings = Vec::new();

        let walker = WalkDir::new(root)
            .contents_first(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_skipped(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                let dir = entry.path().to_path_buf();
                let regular_files = pending.remove(&dir).unwrap_or_default();
                listings.push(DirectoryListing {
                    rel: relative_path(root, &dir),
                    dir,
                    regular_files,
                });
            } else if entry.file_type().is_file() {
                if let (Some(parent), Some(name)) =
                    (entry.path().parent(), entry.file_name().to_str())
                {
                    pending
                        .entry(parent.to_path_buf())
                        .or_default()
                        .push(name.to_string());
                }
            }
        }

        Ok(listings)
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name.starts_with('.') || self.config.is_excluded_dir(&name)
    }
}

fn relative_path(root: &Path, dir: &Path) -> String {
    dir.strip_prefix(root)
        .map(|rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}
