//! `fasubset roary` — one output per row of a presence/absence matrix.

use anyhow::Result;
use clap::Args;

use super::common::CommonArgs;
use crate::model::KeySource;

#[derive(Args, Debug)]
pub struct CmdRoary {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl CmdRoary {
    pub fn run(self) -> Result<()> {
        let source = KeySource::PangenomeRows {
            input: self.common.input.clone(),
        };
        self.common.execute(source)
    }
}
