use anyhow::{Context, Result};
use fs_err as fs;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::io::paths::OutDir;
use crate::io::store::SequenceStore;
use crate::model::KeyGroup;

/// `{savename}[_{tag}].{suffix}` inside `dir`. Path separators in a tag
/// become `_` so every output stays directly under `dir`.
#[derive(Debug, Clone)]
pub struct OutputNaming {
    pub dir: OutDir,
    pub savename: String,
    pub suffix: String,
}

impl OutputNaming {
    pub fn file_name(&self, tag: Option<&str>) -> String {
        match tag {
            Some(tag) => {
                let tag = tag.replace(['/', '\\'], "_");
                format!("{}_{}.{}", self.savename, tag, self.suffix)
            }
            None => format!("{}.{}", self.savename, self.suffix),
        }
    }

    pub fn path_for(&self, tag: Option<&str>) -> PathBuf {
        self.dir.join(self.file_name(tag))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub tag: Option<String>,
    pub path: PathBuf,
    pub requested: usize,
    pub written: usize,
    pub missing: usize,
}

/// Write every record of `group` the store can resolve to one file.
///
/// The file is (re)created even when nothing resolves. Misses and empty
/// records are skipped without complaint.
pub fn extract_seqs<S: SequenceStore + ?Sized>(
    store: &mut S,
    group: &KeyGroup,
    naming: &OutputNaming,
) -> Result<ExtractionReport> {
    let path = naming.path_for(group.tag());
    let file = fs::File::create(&path)?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for key in &group.keys {
        let Some(entry) = store.lookup(key)? else {
            log::debug!("{key}: not in store");
            continue;
        };
        let entry = entry.trim();
        if entry.is_empty() {
            log::debug!("{key}: empty record");
            continue;
        }
        writeln!(out, "{entry}").with_context(|| format!("write {}", path.display()))?;
        written += 1;
    }
    out.flush()
        .with_context(|| format!("write {}", path.display()))?;

    Ok(ExtractionReport {
        tag: group.tag.clone(),
        path,
        requested: group.len(),
        written,
        missing: group.len() - written,
    })
}
