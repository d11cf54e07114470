//! `fasubset syscheck` — version and optional samtools backend.

use anyhow::Result;
use clap::Args;
use fs_err as fs;
use std::path::PathBuf;

use crate::util::tools;

#[derive(Args, Debug)]
pub struct CmdSyscheck {
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Optional explicit samtools binary
    #[arg(long, value_name = "PATH")]
    pub samtools: Option<PathBuf>,
}

impl CmdSyscheck {
    pub fn run(self) -> Result<()> {
        // samtools is optional; report rather than fail
        let samtools = match tools::resolve_samtools(self.samtools.as_deref()) {
            Ok(bin) => {
                let version =
                    tools::get_version(&bin).unwrap_or_else(|e| format!("error: {e}"));
                serde_json::json!({ "path": bin, "version": version })
            }
            Err(e) => serde_json::json!({ "error": format!("{e:#}") }),
        };

        let obj = serde_json::json!({
            "fasubset_version": env!("CARGO_PKG_VERSION"),
            "stores": {
                "native": "noodles-fasta",
                "samtools": samtools,
            },
        });

        if let Some(path) = self.out {
            serde_json::to_writer_pretty(fs::File::create(path)?, &obj)?;
        } else {
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
        Ok(())
    }
}
