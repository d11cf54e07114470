//! `fasubset table` — one output per row of a `tag<TAB>key...` table.

use anyhow::Result;
use clap::Args;

use super::common::CommonArgs;
use crate::model::KeySource;

#[derive(Args, Debug)]
pub struct CmdTable {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CmdTable {
    pub fn run(self) -> Result<()> {
        let source = KeySource::GenericTable {
            input: self.common.input.clone(),
        };
        self.common.execute(source)
    }
}
