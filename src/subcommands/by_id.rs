//! `fasubset by-id` — sequences named in a list, one key per line.

use anyhow::Result;
use clap::Args;

use super::common::CommonArgs;
use crate::model::KeySource;

#[derive(Args, Debug)]
pub struct CmdById {
    #[command(flatten)]
    pub common: CommonArgs,
    /// Appended to the output name as `{savename}_{tag}`
    #[arg(short = 't', long)]
    pub tag: Option<String>,
}

impl CmdById {
    pub fn run(self) -> Result<()> {
        let source = KeySource::PlainList {
            input: self.common.input.clone(),
            tag: self.tag,
        };
        self.common.execute(source)
    }
}
