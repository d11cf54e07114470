//! fasubset: subset a FASTA collection by keys from heterogeneous metadata.
//! Entry point only; see `cli` and `subcommands/*`.

use anyhow::Result;
use fasubset::cli::Cli;
use fasubset::util::logging;

fn main() -> Result<()> {
    logging::init_logging();
    let cli = <Cli as clap::Parser>::parse();
    cli.run()
}
