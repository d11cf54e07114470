//! `fasubset pangenome` — one representative sequence per gene, split into
//! core and accessory outputs.

use anyhow::Result;
use clap::Args;

use super::common::CommonArgs;
use crate::model::KeySource;

#[derive(Args, Debug)]
pub struct CmdPangenome {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CmdPangenome {
    pub fn run(self) -> Result<()> {
        let source = KeySource::PangenomeClassified {
            input: self.common.input.clone(),
        };
        self.common.execute(source)
    }
}
