pub mod cli;
pub mod extract;
pub mod model;
pub mod orchestrator;
pub mod summary;

pub mod io {
    pub mod fasta;
    pub mod paths;
    pub mod store;
}

pub mod keys {
    pub mod error;
    pub mod gene;
    pub mod list;
    pub mod pangenome;
    pub mod table;
}

pub mod util {
    pub mod logging;
    pub mod tools;
}

pub mod subcommands {
    pub mod by_gene;
    pub mod by_id;
    pub mod common;
    pub mod pangenome;
    pub mod roary;
    pub mod syscheck;
    pub mod table;
}
