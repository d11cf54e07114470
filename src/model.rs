use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;

/// Column (0-based) where per-genome cells start in a Roary-style matrix.
pub const PANGENOME_KEY_COLUMN: usize = 14;

/// Annotation table layout (Prokka `.tsv`): locus_tag, ftype, length_bp, gene, ...
pub const ANNOTATION_FEATURE_COLUMN: usize = 1;
pub const ANNOTATION_GENE_COLUMN: usize = 3;
pub const CDS_FEATURE: &str = "CDS";

pub const CORE_TAG: &str = "core";
pub const ACCESSORY_TAG: &str = "accessory";

/// Same wrapping as `samtools faidx`.
pub const DEFAULT_LINE_WIDTH: usize = 60;

/// Ordered list of keys bound to one output tag.
///
/// Order is first-seen order in the source; duplicates are kept and each
/// one is extracted again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyGroup {
    pub tag: Option<String>,
    pub keys: Vec<String>,
}

impl KeyGroup {
    pub fn new(tag: Option<String>) -> Self {
        Self {
            tag,
            keys: Vec::new(),
        }
    }

    pub fn tagged(tag: impl Into<String>) -> Self {
        Self::new(Some(tag.into()))
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

/// How strictly a gene name must agree with the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchLevel {
    /// Gene name equals the query.
    Exact,
    /// Gene name, or its part before the first `_`, equals the query (`dnaA_2` ~ `dnaA`).
    #[default]
    Gene,
    /// As `gene`, ignoring ASCII case.
    Close,
}

impl MatchLevel {
    pub fn matches(self, gene_name: &str, query: &str) -> bool {
        match self {
            MatchLevel::Exact => gene_name == query,
            MatchLevel::Gene => gene_name == query || gene_stem(gene_name) == query,
            MatchLevel::Close => {
                gene_name.eq_ignore_ascii_case(query)
                    || gene_stem(gene_name).eq_ignore_ascii_case(query)
            }
        }
    }
}

fn gene_stem(name: &str) -> &str {
    name.split_once('_').map_or(name, |(stem, _)| stem)
}

/// Where the keys come from. Each variant carries only what its parser needs.
#[derive(Debug, Clone)]
pub enum KeySource {
    GeneQuery {
        input: PathBuf,
        gene: String,
        level: MatchLevel,
        gene_column: usize,
    },
    PlainList {
        input: PathBuf,
        tag: Option<String>,
    },
    GenericTable {
        input: PathBuf,
    },
    PangenomeRows {
        input: PathBuf,
    },
    PangenomeClassified {
        input: PathBuf,
    },
}

impl KeySource {
    pub fn input(&self) -> &std::path::Path {
        match self {
            KeySource::GeneQuery { input, .. }
            | KeySource::PlainList { input, .. }
            | KeySource::GenericTable { input }
            | KeySource::PangenomeRows { input }
            | KeySource::PangenomeClassified { input } => input,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeySource::GeneQuery { .. } => "by-gene",
            KeySource::PlainList { .. } => "by-id",
            KeySource::GenericTable { .. } => "table",
            KeySource::PangenomeRows { .. } => "roary",
            KeySource::PangenomeClassified { .. } => "pangenome",
        }
    }
}
