//! CSS export with fallbacks
//!
//! Targets are tried in order until one succeeds. The chain always ends in
//! an inline result, so generated CSS is never lost.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// Default name of the exported stylesheet
pub const DEFAULT_EXPORT_FILENAME: &str = "theme-variables.css";

/// Where an export ended up
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Written to a file
    Saved(PathBuf),
    /// Handed back for the caller to print or copy
    Inline(String),
}

pub trait ExportTarget {
    fn name(&self) -> &'static str;
    fn export(&mut self, css: &str, filename: &str) -> Result<ExportOutcome>;
}

fn write_into(dir: &Path, css: &str, filename: &str) -> Result<ExportOutcome> {
    fs::create_dir_all(dir)
        .map_err(|e| ThemeError::Export(format!("{}: {}", dir.display(), e)))?;
    let path = dir.join(filename);
    fs::write(&path, css).map_err(|e| ThemeError::Export(format!("{}: {}", path.display(), e)))?;
    Ok(ExportOutcome::Saved(path))
}

/// Save into a chosen directory
#[derive(Debug, Clone)]
pub struct DirectoryExport {
    dir: PathBuf,
}

impl DirectoryExport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ExportTarget for DirectoryExport {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn export(&mut self, css: &str, filename: &str) -> Result<ExportOutcome> {
        write_into(&self.dir, css, filename)
    }
}

/// Save under the system temp directory
#[derive(Debug, Clone, Copy, Default)]
pub struct TempDirExport;

impl ExportTarget for TempDirExport {
    fn name(&self) -> &'static str {
        "temp-dir"
    }

    fn export(&mut self, css: &str, filename: &str) -> Result<ExportOutcome> {
        write_into(&std::env::temp_dir().join("swatch"), css, filename)
    }
}

/// Return the CSS itself
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineExport;

impl ExportTarget for InlineExport {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn export(&mut self, css: &str, _filename: &str) -> Result<ExportOutcome> {
        Ok(ExportOutcome::Inline(css.to_string()))
    }
}

pub struct ExportChain {
    targets: Vec<Box<dyn ExportTarget>>,
    filename: String,
}

impl ExportChain {
    /// An empty chain; exports still fall back to inline
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            targets: Vec::new(),
            filename: filename.into(),
        }
    }

    /// Directory (when given), then temp dir, then inline
    pub fn standard(dir: Option<PathBuf>, filename: impl Into<String>) -> Self {
        let mut chain = Self::new(filename);
        if let Some(dir) = dir {
            chain = chain.with_target(DirectoryExport::new(dir));
        }
        chain.with_target(TempDirExport).with_target(InlineExport)
    }

    pub fn with_target(mut self, target: impl ExportTarget + 'static) -> Self {
        self.targets.push(Box::new(target));
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn export(&mut self, css: &str) -> ExportOutcome {
        for target in &mut self.targets {
            match target.export(css, &self.filename) {
                Ok(outcome) => {
                    tracing::debug!("exported theme CSS via {}", target.name());
                    return outcome;
                }
                Err(e) => tracing::warn!("export via {} failed: {}", target.name(), e),
            }
        }
        ExportOutcome::Inline(css.to_string())
    }
}

impl Default for ExportChain {
    fn default() -> Self {
        Self::standard(None, DEFAULT_EXPORT_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl ExportTarget for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn export(&mut self, _css: &str, _filename: &str) -> Result<ExportOutcome> {
            Err(ThemeError::Export("disk full".to_string()))
        }
    }

    #[test]
    fn test_falls_through_to_inline() {
        let mut chain = ExportChain::new("out.css")
            .with_target(Failing)
            .with_target(InlineExport);
        assert_eq!(chain.export("@theme {}"), ExportOutcome::Inline("@theme {}".to_string()));
    }

    #[test]
    fn test_empty_chain_never_drops_css() {
        let mut chain = ExportChain::new("out.css").with_target(Failing);
        assert_eq!(chain.export("a"), ExportOutcome::Inline("a".to_string()));
    }

    #[test]
    fn test_directory_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("swatch-export-{}", std::process::id()));
        let mut chain = ExportChain::standard(Some(dir.clone()), DEFAULT_EXPORT_FILENAME);

        let outcome = chain.export("@theme {\n}\n");
        let path = dir.join(DEFAULT_EXPORT_FILENAME);
        assert_eq!(outcome, ExportOutcome::Saved(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "@theme {\n}\n");

        let _ = fs::remove_dir_all(dir);
    }
}
