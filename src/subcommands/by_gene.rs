//! `fasubset by-gene` — CDS sequences whose annotated gene name matches.

use anyhow::Result;
use clap::Args;

use super::common::CommonArgs;
use crate::model::{KeySource, MatchLevel, ANNOTATION_GENE_COLUMN};

#[derive(Args, Debug)]
pub struct CmdByGene {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Gene name to search for
    #[arg(short = 'g', long)]
    pub gene: String,
    /// Match level
    #[arg(short = 'm', long = "match", value_enum, default_value_t = MatchLevel::Gene)]
    pub level: MatchLevel,
    /// 0-based column holding the gene name
    #[arg(long, default_value_t = ANNOTATION_GENE_COLUMN)]
    pub gene_column: usize,
}

impl CmdByGene {
    pub fn run(self) -> Result<()> {
        let source = KeySource::GeneQuery {
            input: self.common.input.clone(),
            gene: self.gene,
            level: self.level,
            gene_column: self.gene_column,
        };
        self.common.execute(source)
    }
}
