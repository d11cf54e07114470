use anyhow::{Context, Result};
use needletail::parse_fastx_file;
use std::path::Path;

/// Checks file exists, is readable, and looks like FASTA by reading first record.
pub fn validate_fasta(p: &Path) -> Result<()> {
    if !p.exists() {
        return Err(anyhow::anyhow!("FASTA not found: {}", p.display()));
    }
    let mut rdr = parse_fastx_file(p).with_context(|| format!("open fasta {}", p.display()))?;
    let _ = rdr
        .next()
        .transpose()
        .with_context(|| format!("read first record in {}", p.display()))?;
    Ok(())
}
