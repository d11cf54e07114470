//! Roary-style `gene_presence_absence.csv` matrices.
//!
//! Columns 0..14 are gene-level metadata, columns 14.. hold one cell per
//! genome. A cell is a bare locus tag, or empty when the genome lacks the
//! gene. Cells with whitespace or `:` carry several loci or annotation text
//! and are not usable as keys.

use serde::Serialize;
use std::io::Read;

use crate::keys::error::{KeyError, MalformedRow};
use crate::model::{KeyGroup, ACCESSORY_TAG, CORE_TAG, PANGENOME_KEY_COLUMN};

fn matrix_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}

fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

/// A record that is not valid UTF-8 only spoils itself; the reader has
/// already moved past it. Other csv errors stay fatal.
fn row_error(e: csv::Error) -> KeyError {
    let row = match e.kind() {
        csv::ErrorKind::Utf8 { pos, err } => Some(MalformedRow::new(
            pos.as_ref().map(|p| p.line()).unwrap_or_default(),
            format!("not valid UTF-8 ({err})"),
        )),
        _ => None,
    };
    match row {
        Some(row) => row.into(),
        None => e.into(),
    }
}

/// Returns the cell as a key, or `None` when it must be discarded.
pub fn filter_cell(cell: &str) -> Option<&str> {
    let cell = cell.trim_matches('"');
    if cell.is_empty() || cell.contains(':') || cell.chars().any(char::is_whitespace) {
        None
    } else {
        Some(cell)
    }
}

/// Surviving keys of one row, in column order.
pub fn row_keys(record: &csv::StringRecord) -> Vec<&str> {
    record
        .iter()
        .skip(PANGENOME_KEY_COLUMN)
        .filter_map(filter_cell)
        .collect()
}

fn check_width(record: &csv::StringRecord) -> Result<(), MalformedRow> {
    if record.len() <= PANGENOME_KEY_COLUMN {
        Err(MalformedRow::new(
            record_line(record),
            format!(
                "{} columns; genome cells start at column {}",
                record.len(),
                PANGENOME_KEY_COLUMN + 1
            ),
        ))
    } else {
        Ok(())
    }
}

/// One group per data row, tagged with the row's first field.
pub struct GenomeRows<R> {
    records: csv::StringRecordsIntoIter<R>,
    header_seen: bool,
}

impl<R: Read> GenomeRows<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: matrix_reader(reader).into_records(),
            header_seen: false,
        }
    }
}

impl<R: Read> Iterator for GenomeRows<R> {
    type Item = Result<KeyGroup, KeyError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.header_seen {
            self.header_seen = true;
            if let Err(e) = self.records.next()? {
                return Some(Err(e.into()));
            }
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(row_error(e))),
        };
        if let Err(row) = check_width(&record) {
            return Some(Err(row.into()));
        }

        let tag = record.get(0).unwrap_or_default().trim_matches('"');
        let mut group = KeyGroup::tagged(tag);
        for key in row_keys(&record) {
            group.push(key);
        }
        Some(Ok(group))
    }
}

/// Core/accessory split of a gene-oriented matrix.
#[derive(Debug, Default, Serialize)]
pub struct PangenomeSplit {
    pub num_samples: usize,
    pub core: KeyGroup,
    pub accessory: KeyGroup,
    pub malformed: Vec<MalformedRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Core,
    Accessory,
}

/// `n` is the number of genomes carrying the gene.
pub fn classify(n: usize, num_samples: usize) -> Result<Occupancy, String> {
    match n.cmp(&num_samples) {
        std::cmp::Ordering::Equal => Ok(Occupancy::Core),
        std::cmp::Ordering::Less => Ok(Occupancy::Accessory),
        std::cmp::Ordering::Greater => Err(format!(
            "{n} occupied genome cells but the header declares {num_samples} genomes"
        )),
    }
}

/// Keep the first surviving locus of every gene row as its representative,
/// filed under core when every genome carries the gene and accessory otherwise.
///
/// Rows that are too short, undecodable, carry no usable locus, or have more
/// loci than genomes are reported in `malformed` and land in neither group.
pub fn classify_pangenome<R: Read>(reader: R) -> Result<PangenomeSplit, KeyError> {
    let mut split = PangenomeSplit {
        core: KeyGroup::tagged(CORE_TAG),
        accessory: KeyGroup::tagged(ACCESSORY_TAG),
        ..Default::default()
    };

    let mut records = matrix_reader(reader).into_records();
    let Some(header) = records.next().transpose()? else {
        return Ok(split);
    };
    // a trailing delimiter must not add a genome
    split.num_samples = header
        .iter()
        .skip(PANGENOME_KEY_COLUMN)
        .filter(|name| !name.trim_matches('"').trim().is_empty())
        .count();

    for record in records {
        let record = match record.map_err(row_error) {
            Ok(record) => record,
            Err(KeyError::Malformed(row)) => {
                split.malformed.push(row);
                continue;
            }
            Err(e) => return Err(e),
        };
        if let Err(row) = check_width(&record) {
            split.malformed.push(row);
            continue;
        }
        let ids = row_keys(&record);
        let Some(representative) = ids.first() else {
            split
                .malformed
                .push(MalformedRow::new(record_line(&record), "no genome carries this gene"));
            continue;
        };
        match classify(ids.len(), split.num_samples) {
            Ok(Occupancy::Core) => split.core.push(*representative),
            Ok(Occupancy::Accessory) => split.accessory.push(*representative),
            Err(reason) => split
                .malformed
                .push(MalformedRow::new(record_line(&record), reason)),
        }
    }

    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = r#""Gene","Non-unique Gene name","Annotation","No. isolates","No. sequences","Avg sequences per isolate","Genome Fragment","Order within Fragment","Accessory Fragment","Accessory Order with Fragment","QC","Min group size nuc","Max group size nuc","Avg group size nuc""#;

    fn row(gene: &str, cells: &[&str]) -> String {
        let mut fields = vec![
            format!("\"{gene}\""),
            "\"\"".to_string(),
            "\"hypothetical protein, putative\"".to_string(),
        ];
        fields.extend(std::iter::repeat("\"1\"".to_string()).take(11));
        fields.extend(cells.iter().map(|c| format!("\"{c}\"")));
        fields.join(",")
    }

    fn matrix(genomes: &[&str], rows: &[String]) -> String {
        let mut header = META.to_string();
        for g in genomes {
            header.push_str(&format!(",\"{g}\""));
        }
        let mut out = header;
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out.push('\n');
        out
    }

    #[test]
    fn cell_filter() {
        assert_eq!(filter_cell("\"g1\""), Some("g1"));
        assert_eq!(filter_cell("g1"), Some("g1"));
        assert_eq!(filter_cell("\"\""), None);
        assert_eq!(filter_cell(""), None);
        assert_eq!(filter_cell("g1 g2"), None);
        assert_eq!(filter_cell("g1\tg2"), None);
        assert_eq!(filter_cell("contig:12"), None);
    }

    #[test]
    fn full_occupancy_is_core() {
        let input = matrix(&["A", "B", "C"], &[row("dnaA", &["g1", "g2", "", "g4"])]);
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert_eq!(split.num_samples, 3);
        assert_eq!(split.core.keys, vec!["g1"]);
        assert!(split.accessory.is_empty());
        assert!(split.malformed.is_empty());
    }

    #[test]
    fn partial_occupancy_is_accessory() {
        let input = matrix(&["A", "B", "C"], &[row("dnaA", &["g1", "", "", ""])]);
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert!(split.core.is_empty());
        assert_eq!(split.accessory.keys, vec!["g1"]);
    }

    #[test]
    fn representative_is_first_surviving_cell() {
        let input = matrix(&["A", "B", "C"], &[row("x", &["", "a b", "h7", "h8"])]);
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert_eq!(split.accessory.keys, vec!["h7"]);
    }

    #[test]
    fn overfull_row_is_reported() {
        let input = matrix(
            &["A", "B"],
            &[row("x", &["a1", "b1", "c1"]), row("y", &["a2", "b2"])],
        );
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert_eq!(split.malformed.len(), 1);
        assert_eq!(split.malformed[0].line, 2);
        assert_eq!(split.core.keys, vec!["a2"]);
    }

    #[test]
    fn every_good_row_lands_in_exactly_one_group() {
        let rows = vec![
            row("a", &["a1", "a2", "a3"]),
            row("b", &["", "b2", ""]),
            row("c", &["c1", "", "c3"]),
            row("d", &["d1", "d2", "d3"]),
            row("e", &["", "", ""]),
            row("f", &["f1"]),
        ];
        let n_rows = rows.len();
        let input = matrix(&["A", "B", "C"], &rows);
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert_eq!(
            split.core.len() + split.accessory.len() + split.malformed.len(),
            n_rows
        );
        assert_eq!(split.core.keys, vec!["a1", "d1"]);
        assert_eq!(split.accessory.keys, vec!["b2", "c1", "f1"]);
        assert_eq!(split.malformed.len(), 1);
    }

    #[test]
    fn short_row_lands_in_neither_group() {
        let input = format!(
            "{}\"short\",\"\",\"x\",\"1\"\n",
            matrix(&["A", "B"], &[row("ok", &["k1", "k2"])])
        );
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert_eq!(split.core.keys, vec!["k1"]);
        assert!(split.accessory.is_empty());
        assert_eq!(split.malformed.len(), 1);
        assert_eq!(split.malformed[0].line, 3);
        assert!(split.malformed[0].reason.contains("4 columns"));
    }

    #[test]
    fn undecodable_row_is_reported_and_rest_classified() {
        let mut bad = row("bad", &["x1", ""]).into_bytes();
        let at = bad.iter().rposition(|&b| b == b'x').unwrap();
        bad[at] = 0xff;

        let mut input = matrix(&["A", "B"], &[row("a", &["a1", "a2"])]).into_bytes();
        input.extend_from_slice(&bad);
        input.push(b'\n');
        input.extend_from_slice(row("c", &["", "c2"]).as_bytes());
        input.push(b'\n');

        let split = classify_pangenome(&input[..]).unwrap();
        assert_eq!(split.core.keys, vec!["a1"]);
        assert_eq!(split.accessory.keys, vec!["c2"]);
        assert_eq!(split.malformed.len(), 1);
        assert_eq!(split.malformed[0].line, 3);
        assert!(split.malformed[0].reason.contains("UTF-8"));
    }

    #[test]
    fn trailing_comma_does_not_add_a_genome() {
        let mut input = matrix(&["A", "B"], &[]);
        input.insert(input.len() - 1, ',');
        let split = classify_pangenome(input.as_bytes()).unwrap();
        assert_eq!(split.num_samples, 2);
    }

    #[test]
    fn classify_boundaries() {
        assert_eq!(classify(3, 3), Ok(Occupancy::Core));
        assert_eq!(classify(1, 3), Ok(Occupancy::Accessory));
        assert!(classify(4, 3).is_err());
    }

    #[test]
    fn empty_matrix() {
        let split = classify_pangenome("".as_bytes()).unwrap();
        assert_eq!(split.num_samples, 0);
        assert!(split.core.is_empty() && split.accessory.is_empty());
    }

    #[test]
    fn genome_rows_stream_one_group_per_row() {
        let input = matrix(
            &["A", "B", "C"],
            &[row("genome1", &["x1", "", "x3"]), row("genome2", &["y1 y2", "y:3", "y4"])],
        );
        let groups: Vec<_> = GenomeRows::new(input.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].tag(), Some("genome1"));
        assert_eq!(groups[0].keys, vec!["x1", "x3"]);
        assert_eq!(groups[1].keys, vec!["y4"]);
    }

    #[test]
    fn short_genome_row_is_reported() {
        let input = format!("{META}\n\"short\",\"1\"\n{}\n", row("ok", &["k1"]));
        let rows: Vec<_> = GenomeRows::new(input.as_bytes()).collect();
        assert_eq!(rows.len(), 2);
        assert!(matches!(&rows[0], Err(e) if e.is_recoverable()));
        assert_eq!(rows[1].as_ref().unwrap().keys, vec!["k1"]);
    }

    #[test]
    fn undecodable_genome_row_does_not_end_iteration() {
        let mut input = matrix(&["A"], &[row("g1", &["k1"])]).into_bytes();
        input.extend_from_slice(b"\"g\xff2\",\"k2\"\n");
        input.extend_from_slice(row("g3", &["k3"]).as_bytes());
        input.push(b'\n');

        let rows: Vec<_> = GenomeRows::new(&input[..]).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].as_ref().unwrap().keys, vec!["k1"]);
        match &rows[1] {
            Err(KeyError::Malformed(row)) => assert_eq!(row.line, 3),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(rows[2].as_ref().unwrap().tag(), Some("g3"));
    }
}
