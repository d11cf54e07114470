//! Flags every sub-command shares, and the run they all end in.

use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use crate::extract::OutputNaming;
use crate::io::fasta;
use crate::io::paths::{InputFile, OutDir};
use crate::io::store::{FaidxStore, SamtoolsStore, SequenceStore};
use crate::model::{KeySource, DEFAULT_LINE_WIDTH};
use crate::orchestrator;
use crate::util::tools;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StoreKind {
    /// In-process .fai lookups (index built on first use)
    #[default]
    Native,
    /// One `samtools faidx` call per key
    Samtools,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// FASTA file of sequences
    #[arg(short = 'f', long)]
    pub fasta: PathBuf,
    /// File the keys are read from
    #[arg(short = 'i', long = "input", alias = "input-file")]
    pub input: PathBuf,
    /// Output directory, created under --output-path
    #[arg(short = 'o', long, default_value = "subset_faidx")]
    pub output_directory: PathBuf,
    /// Parent of the output directory (default: current directory)
    #[arg(short = 'p', long)]
    pub output_path: Option<PathBuf>,
    /// Prefix of every output file
    #[arg(short = 's', long, default_value = "subset")]
    pub savename: String,
    /// Output file extension (default: the FASTA file's)
    #[arg(long)]
    pub suffix: Option<String>,
    #[arg(long, value_enum, default_value_t = StoreKind::Native)]
    pub store: StoreKind,
    /// Path to samtools for --store samtools (else $FASUBSET_SAMTOOLS, else PATH)
    #[arg(long, value_name = "PATH")]
    pub samtools: Option<PathBuf>,
    /// Residues per line in written records (native store)
    #[arg(long, default_value_t = DEFAULT_LINE_WIDTH)]
    pub line_width: usize,
    /// Write a JSON run summary here
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,
}

impl CommonArgs {
    fn naming(&self, fasta: &InputFile) -> Result<OutputNaming> {
        let suffix = match &self.suffix {
            Some(s) => s.trim_start_matches('.').to_string(),
            None => fasta
                .extension()
                .ok_or_else(|| {
                    anyhow!(
                        "{} has no extension; pass --suffix",
                        fasta.path().display()
                    )
                })?
                .to_string(),
        };
        let top = match &self.output_path {
            Some(p) => OutDir::make(p)?,
            None => OutDir::open(&std::env::current_dir()?)?,
        };
        Ok(OutputNaming {
            dir: top.make_subdir(&self.output_directory)?,
            savename: self.savename.clone(),
            suffix,
        })
    }

    fn open_store(&self, fasta: &InputFile) -> Result<Box<dyn SequenceStore>> {
        let store: Box<dyn SequenceStore> = match self.store {
            StoreKind::Native => Box::new(FaidxStore::open(fasta.path(), self.line_width)?),
            StoreKind::Samtools => {
                let bin = tools::resolve_samtools(self.samtools.as_deref())?;
                log::info!("Using samtools at {}", bin.display());
                if let Ok(v) = tools::get_version(&bin) {
                    log::info!("samtools: {v}");
                }
                Box::new(SamtoolsStore::new(bin, fasta.path()))
            }
        };
        Ok(store)
    }

    pub fn execute(&self, source: KeySource) -> Result<()> {
        let t0 = Instant::now();
        let fasta_file = InputFile::open(&self.fasta)?;
        fasta::validate_fasta(fasta_file.path())?;

        let naming = self.naming(&fasta_file)?;
        log::info!("writing to {}", naming.dir.path().display());
        let mut store = self.open_store(&fasta_file)?;

        let summary = orchestrator::run(&source, store.as_mut(), &naming)?;
        summary.log();
        if let Some(path) = &self.summary {
            summary.write_json(path)?;
        }
        log::info!("done in {:.2}s", t0.elapsed().as_secs_f32());
        Ok(())
    }
}
