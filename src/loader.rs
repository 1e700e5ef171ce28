//! Reads people from headerless `first_name,last_name,gender` text.
//!
//! Whitespace around each field is trimmed, so ` Ann , Lee ,Female` loads
//! as `Ann`/`Lee`/`Female`. Plain CSV readers keep that whitespace.

use crate::error::{Result, StoreError};
use crate::models::NewPerson;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const FIELDS: usize = 3;

/// Parse a delimited file into new records, in file order.
///
/// Fails with [`StoreError::Parse`] on the first line carrying fewer than
/// three fields; fields past the third are ignored.
pub fn load_from_delimited_text<P: AsRef<Path>>(path: P) -> Result<Vec<NewPerson>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let people = parse_delimited(file)?;
    debug!(path = %path.display(), records = people.len(), "parsed delimited file");
    Ok(people)
}

/// Parse delimited text from any reader
pub fn parse_delimited<R: Read>(reader: R) -> Result<Vec<NewPerson>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut people = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() < FIELDS {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(StoreError::Parse {
                line,
                found: record.len(),
            });
        }
        people.push(NewPerson::new(&record[0], &record[1], &record[2]));
    }
    Ok(people)
}
