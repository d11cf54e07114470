use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const SAMTOOLS_ENV: &str = "FASUBSET_SAMTOOLS";

/// Resolve the samtools executable.
/// Priority: CLI override > environment variable > PATH search
pub fn resolve_samtools(samtools: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = samtools {
        return if p.exists() {
            Ok(p.to_path_buf())
        } else {
            Err(anyhow!("samtools not found at {}", p.display()))
        };
    }
    if let Some(envp) = std::env::var_os(SAMTOOLS_ENV) {
        return Ok(PathBuf::from(envp));
    }
    which::which("samtools")
        .with_context(|| format!("samtools not found (set --samtools, {SAMTOOLS_ENV}, or PATH)"))
}

pub fn get_version(bin: &Path) -> Result<String> {
    let out = Command::new(bin)
        .arg("--version")
        .output()
        .with_context(|| format!("spawn {} --version", bin.display()))?;
    let s = String::from_utf8_lossy(&out.stdout);
    Ok(s.lines().next().unwrap_or_default().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_must_exist() {
        let err = resolve_samtools(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(err.to_string().contains("samtools"), "message mentions samtools");
    }

    #[test]
    fn explicit_path_wins() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(resolve_samtools(Some(tmp.path())).unwrap(), tmp.path());
    }
}
