//! Turn a key source into output files.
//!
//! Table and matrix rows are extracted as soon as they are parsed, so a
//! bad row or a failed write only costs that row's group.

use anyhow::Result;

use crate::extract::{extract_seqs, OutputNaming};
use crate::io::paths::InputFile;
use crate::io::store::SequenceStore;
use crate::keys::error::{KeyError, MalformedRow};
use crate::keys::{gene, list, pangenome, table};
use crate::model::{KeyGroup, KeySource};
use crate::summary::RunSummary;

fn report_malformed(summary: &mut RunSummary, input: &InputFile, rows: &[MalformedRow]) {
    for row in rows {
        log::warn!("{}: skipped {row}", input.file_name());
    }
    summary.malformed_rows += rows.len();
}

fn extract_group(
    summary: &mut RunSummary,
    store: &mut dyn SequenceStore,
    group: &KeyGroup,
    naming: &OutputNaming,
) {
    let outcome = extract_seqs(store, group, naming);
    summary.record(group.tag(), outcome);
}

/// Drain a row stream, extracting each group before reading the next row.
fn stream_groups<I>(
    summary: &mut RunSummary,
    input: &InputFile,
    rows: I,
    store: &mut dyn SequenceStore,
    naming: &OutputNaming,
) -> Result<()>
where
    I: Iterator<Item = Result<KeyGroup, KeyError>>,
{
    for row in rows {
        match row {
            Ok(group) => extract_group(summary, store, &group, naming),
            Err(KeyError::Malformed(row)) => {
                report_malformed(summary, input, std::slice::from_ref(&row))
            }
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("reading {}", input.path().display())))
            }
        }
    }
    Ok(())
}

pub fn run(
    source: &KeySource,
    store: &mut dyn SequenceStore,
    naming: &OutputNaming,
) -> Result<RunSummary> {
    let input = InputFile::open(source.input())?;
    let mut summary = RunSummary::new(source.name());
    log::info!("{}: reading keys from {}", source.name(), input.path().display());

    match source {
        KeySource::GeneQuery {
            gene,
            level,
            gene_column,
            ..
        } => {
            let hits = gene::keys_from_gene_name(input.reader()?, gene, *level, *gene_column)?;
            report_malformed(&mut summary, &input, &hits.malformed);
            if hits.keys.is_empty() {
                log::warn!("no CDS matched gene {gene} ({level:?})");
            } else {
                log::info!("{} CDS matched gene {gene}", hits.keys.len());
            }
            extract_group(&mut summary, store, &hits.keys, naming);
        }
        KeySource::PlainList { tag, .. } => {
            let group = list::keys_from_list(input.reader()?, tag.clone())?;
            log::info!("{} key(s) listed", group.len());
            extract_group(&mut summary, store, &group, naming);
        }
        KeySource::GenericTable { .. } => {
            let rows = table::TableRows::new(input.reader()?);
            stream_groups(&mut summary, &input, rows, store, naming)?;
        }
        KeySource::PangenomeRows { .. } => {
            let rows = pangenome::GenomeRows::new(input.reader()?);
            stream_groups(&mut summary, &input, rows, store, naming)?;
        }
        KeySource::PangenomeClassified { .. } => {
            let split = pangenome::classify_pangenome(input.reader()?)?;
            report_malformed(&mut summary, &input, &split.malformed);
            log::info!(
                "{} genomes; {} core and {} accessory gene(s)",
                split.num_samples,
                split.core.len(),
                split.accessory.len()
            );
            extract_group(&mut summary, store, &split.accessory, naming);
            extract_group(&mut summary, store, &split.core, naming);
        }
    }

    Ok(summary)
}
