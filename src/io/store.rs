//! Keyed random access into a FASTA collection.
//!
//! `FaidxStore` loads the `.fai` index once and answers every lookup in
//! process. `SamtoolsStore` runs `samtools faidx` per key and exists for
//! parity with pipelines that already depend on samtools.

use anyhow::{anyhow, Context, Result};
use fs_err as fs;
use noodles_fasta as fasta;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Lookup contract: `Ok(None)` for a name the store does not hold.
/// `Err` is reserved for the store itself failing.
pub trait SequenceStore {
    fn lookup(&mut self, key: &str) -> Result<Option<String>>;
}

pub struct FaidxStore {
    path: PathBuf,
    reader: fasta::io::IndexedReader<BufReader<fs::File>>,
    line_width: usize,
}

pub fn fai_path(fasta: &Path) -> PathBuf {
    let mut s = fasta.as_os_str().to_owned();
    s.push(".fai");
    PathBuf::from(s)
}

fn load_or_build_index(path: &Path) -> Result<fasta::fai::Index> {
    let fai = fai_path(path);
    if fai.exists() {
        let file = fs::File::open(&fai)?;
        let index = fasta::fai::io::Reader::new(BufReader::new(file))
            .read_index()
            .with_context(|| format!("read FASTA index {}", fai.display()))?;
        return Ok(index);
    }

    log::info!("no index at {}; building one", fai.display());
    let index =
        fasta::io::index(path).with_context(|| format!("index FASTA {}", path.display()))?;
    match fs::File::create(&fai) {
        Ok(file) => {
            if let Err(e) = fasta::fai::io::Writer::new(file).write_index(&index) {
                log::warn!("could not write {}: {e}", fai.display());
            }
        }
        Err(e) => log::warn!("index kept in memory only: {e}"),
    }
    Ok(index)
}

impl FaidxStore {
    pub fn open(path: &Path, line_width: usize) -> Result<Self> {
        if line_width == 0 {
            return Err(anyhow!("line width must be at least 1"));
        }
        let index = load_or_build_index(path)?;
        let file = fs::File::open(path)?;
        let reader = fasta::io::IndexedReader::new(BufReader::new(file), index);
        Ok(Self {
            path: path.to_path_buf(),
            reader,
            line_width,
        })
    }

    fn render(&self, record: &fasta::Record) -> Result<String> {
        let mut buf = Vec::new();
        {
            let mut writer = fasta::io::writer::Builder::default()
                .set_line_base_count(self.line_width)
                .build_from_writer(&mut buf);
            writer.write_record(record)?;
        }
        Ok(String::from_utf8(buf)?)
    }
}

impl SequenceStore for FaidxStore {
    fn lookup(&mut self, key: &str) -> Result<Option<String>> {
        let region = match key.parse() {
            Ok(region) => region,
            Err(e) => {
                log::debug!("{key}: not a usable sequence name ({e})");
                return Ok(None);
            }
        };
        match self.reader.query(&region) {
            Ok(record) => self.render(&record).map(Some),
            // noodles reports unknown names as invalid input
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("query {key} in {}", self.path.display()))
            }
        }
    }
}

pub struct SamtoolsStore {
    bin: PathBuf,
    fasta: PathBuf,
}

impl SamtoolsStore {
    pub fn new(bin: PathBuf, fasta: &Path) -> Self {
        Self {
            bin,
            fasta: fasta.to_path_buf(),
        }
    }
}

impl SequenceStore for SamtoolsStore {
    fn lookup(&mut self, key: &str) -> Result<Option<String>> {
        let out = Command::new(&self.bin)
            .arg("faidx")
            .arg(&self.fasta)
            .arg(key)
            .output()
            .with_context(|| format!("spawn {} faidx", self.bin.display()))?;
        // samtools exits non-zero for unknown names; treat like a miss
        let entry = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if !out.status.success() || entry.is_empty() || entry == ">" {
            log::debug!(
                "samtools faidx {key}: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
            return Ok(None);
        }
        Ok(Some(entry))
    }
}
