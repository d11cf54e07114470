use std::io::{BufRead, Split};

use crate::keys::error::{decode_line, KeyError, MalformedRow};
use crate::model::KeyGroup;

/// Rows of a tab-delimited `tag<TAB>key<TAB>key...` table, one group per row.
///
/// The header line is skipped. Keys are passed through untouched, empty
/// fields included; the store simply misses on them. A row that is not
/// valid UTF-8 comes back as a malformed row and iteration carries on.
pub struct TableRows<R> {
    lines: Split<R>,
    line_no: u64,
}

impl<R: BufRead> TableRows<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TableRows<R> {
    type Item = Result<KeyGroup, KeyError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let bytes = match self.lines.next()? {
                Ok(bytes) => bytes,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if self.line_no == 1 {
                continue;
            }
            let line = match decode_line(bytes, self.line_no) {
                Ok(line) => line,
                Err(row) => return Some(Err(row.into())),
            };
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let tag = fields.next().unwrap_or_default();
            if tag.is_empty() {
                return Some(Err(
                    MalformedRow::new(self.line_no, "first column (group tag) is empty").into(),
                ));
            }
            let mut group = KeyGroup::tagged(tag);
            fields.for_each(|key| group.push(key));
            return Some(Ok(group));
        }
    }
}
