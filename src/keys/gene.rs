//! Keys from an annotation table (Prokka `.tsv`) by gene name.

use std::io::BufRead;

use crate::keys::error::{decode_line, KeyError, MalformedRow};
use crate::model::{KeyGroup, MatchLevel, ANNOTATION_FEATURE_COLUMN, CDS_FEATURE};

#[derive(Debug, Default)]
pub struct GeneHits {
    pub keys: KeyGroup,
    pub malformed: Vec<MalformedRow>,
}

/// Collect the locus tags of `CDS` rows whose gene name satisfies `level`.
///
/// The group is tagged with the query. No hit is not an error: the group is
/// simply empty. Rows too short to hold the gene column are reported and
/// skipped.
pub fn keys_from_gene_name<R: BufRead>(
    reader: R,
    query: &str,
    level: MatchLevel,
    gene_column: usize,
) -> Result<GeneHits, KeyError> {
    let mut hits = GeneHits {
        keys: KeyGroup::tagged(query),
        malformed: Vec::new(),
    };
    let needed = gene_column.max(ANNOTATION_FEATURE_COLUMN) + 1;

    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let line = match decode_line(bytes?, idx as u64 + 1) {
            Ok(line) => line,
            Err(row) => {
                hits.malformed.push(row);
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < needed {
            hits.malformed.push(MalformedRow::new(
                idx as u64 + 1,
                format!("expected at least {needed} columns, found {}", fields.len()),
            ));
            continue;
        }
        if fields[ANNOTATION_FEATURE_COLUMN] != CDS_FEATURE {
            continue;
        }
        if level.matches(fields[gene_column], query) {
            hits.keys.push(fields[0]);
        }
    }

    Ok(hits)
}
