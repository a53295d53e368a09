// A headerless CSV with two positional columns: the human-readable number
// and the barcode payload.

use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{SheetError, SheetResult};

// `number` stays as the raw cell text so numeric and alphanumeric
// captions print exactly as written.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LabelRecord {
    pub number: String,
    pub text: String,
}

impl LabelRecord {
    pub fn new(number: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            text: text.into(),
        }
    }
}

pub fn read_records(path: &Path) -> SheetResult<Vec<LabelRecord>> {
    let file = std::fs::File::open(path).map_err(|e| SheetError::Csv {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let records = parse_records(file).map_err(|source| SheetError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = records.len(), "label table loaded");
    Ok(records)
}

pub fn parse_records<R: Read>(rdr: R) -> Result<Vec<LabelRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut out = Vec::new();
    for (i, row) in reader.deserialize::<LabelRecord>().enumerate() {
        let rec = row?;
        debug!(row = i, text = %rec.text, len = rec.text.chars().count(), "barcode text");
        out.push(rec);
    }
    Ok(out)
}
