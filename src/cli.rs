//! CLI definition and top-level dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::subcommands::{
    by_gene::CmdByGene, by_id::CmdById, pangenome::CmdPangenome, roary::CmdRoary,
    syscheck::CmdSyscheck, table::CmdTable,
};

#[derive(Parser, Debug)]
#[command(
    name = "fasubset",
    version,
    about = "Extract FASTA subsets by keys from annotation tables, pangenome matrices and ID lists"
)]
pub struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One file per genome row of a Roary gene_presence_absence.csv
    Roary(CmdRoary),

    /// Core and accessory representatives from a Roary matrix
    Pangenome(CmdPangenome),

    /// CDS whose gene name matches, from a Prokka .tsv
    ByGene(CmdByGene),

    /// Keys listed one per line
    ById(CmdById),

    /// One file per row of a tag<TAB>keys table
    Table(CmdTable),

    /// Report version and samtools availability
    Syscheck(CmdSyscheck),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.cmd {
            Commands::Roary(cmd) => cmd.run(),
            Commands::Pangenome(cmd) => cmd.run(),
            Commands::ByGene(cmd) => cmd.run(),
            Commands::ById(cmd) => cmd.run(),
            Commands::Table(cmd) => cmd.run(),
            Commands::Syscheck(cmd) => cmd.run(),
        }
    }
}
