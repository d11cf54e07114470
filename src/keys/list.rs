use std::io::BufRead;

use crate::keys::error::KeyError;
use crate::model::KeyGroup;

/// One key per line: the first whitespace-delimited token. Blank lines are skipped,
/// so FASTA headers or `id<TAB>note` lists work as-is once the `>` is gone.
/// Undecodable bytes are replaced, so such a key shows up as missing.
pub fn keys_from_list<R: BufRead>(reader: R, tag: Option<String>) -> Result<KeyGroup, KeyError> {
    let mut group = KeyGroup::new(tag);
    for bytes in reader.split(b'\n') {
        let bytes = bytes?;
        if let Some(key) = String::from_utf8_lossy(&bytes).split_whitespace().next() {
            group.push(key);
        }
    }
    Ok(group)
}
