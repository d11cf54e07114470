//! Validated path values: a directory that exists, an input file that exists.

use anyhow::{anyhow, Context, Result};
use fs_err as fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutDir(PathBuf);

impl OutDir {
    /// Existing directory only.
    pub fn open(path: &Path) -> Result<Self> {
        let path = absolute(path)?;
        if path.is_dir() {
            Ok(Self(path))
        } else {
            Err(anyhow!("not a directory: {}", path.display()))
        }
    }

    /// Create (recursively) if needed, then validate.
    pub fn make(path: &Path) -> Result<Self> {
        let path = absolute(path)?;
        fs::create_dir_all(&path)
            .with_context(|| format!("create output directory {}", path.display()))?;
        Self::open(&path)
    }

    pub fn make_subdir(&self, name: impl AsRef<Path>) -> Result<Self> {
        Self::make(&self.0.join(name))
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.0.join(name)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile(PathBuf);

impl InputFile {
    pub fn open(path: &Path) -> Result<Self> {
        let path = absolute(path)?;
        if path.is_file() {
            Ok(Self(path))
        } else {
            Err(anyhow!("input file not found: {}", path.display()))
        }
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.file_name().and_then(|n| n.to_str()).unwrap_or_default()
    }

    /// Text after the last `.`, e.g. `fa` for `genes.ffn.fa`.
    pub fn extension(&self) -> Option<&str> {
        self.0.extension().and_then(|e| e.to_str())
    }

    pub fn reader(&self) -> Result<BufReader<fs::File>> {
        Ok(BufReader::new(fs::File::open(&self.0)?))
    }
}
