use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Collects `.rs` files below a set of roots.
pub struct SourceWalker {
    roots: Vec<PathBuf>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl SourceWalker {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ignore_patterns: vec![],
        }
    }

    /// Invalid patterns are skipped with a warning.
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("Skipping ignore pattern `{}`: {}", pattern, e);
                    None
                }
            })
            .collect();
        self
    }

    /// Files given directly are always kept; directories are walked
    /// recursively honouring `.gitignore`. Output is sorted and deduplicated.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for root in &self.roots {
            if root.is_file() {
                files.push(root.clone());
                continue;
            }
            if !root.exists() {
                anyhow::bail!("No such file or directory: {}", root.display());
            }

            let walker = WalkBuilder::new(root).hidden(false).git_ignore(true).build();
            for entry in walker {
                let entry = entry?;
                let path = entry.path();
                if path.is_file() && self.should_process(root, path) {
                    files.push(path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }

    /// Patterns match either the full path or the path below the walk root,
    /// so `target/**` skips `<root>/target`.
    fn should_process(&self, root: &Path, path: &Path) -> bool {
        if path.extension().is_none_or(|ext| ext != "rs") {
            return false;
        }
        let relative = path.strip_prefix(root).ok();
        !self.ignore_patterns.iter().any(|p| {
            p.matches_path(path) || relative.is_some_and(|rel| p.matches_path(rel))
        })
    }
}

pub fn find_rust_files(roots: &[PathBuf], ignore_patterns: &[String]) -> Result<Vec<PathBuf>> {
    SourceWalker::new(roots.to_vec())
        .with_ignore_patterns(ignore_patterns)
        .walk()
}
