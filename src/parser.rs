//! JSON decoder for raw portal grade payloads.

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::debug;

use crate::record::RawGradeRecord;

/// Key under which the portal wraps its grade list.
const ENVELOPE_KEY: &str = "grades";

/// Decodes raw grade records from JSON bytes.
///
/// Accepts a top-level array of objects, or an object holding that array
/// under `"grades"`. Array entries that are not objects are skipped.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON or carry no grade array.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawGradeRecord>> {
    let root: Value = serde_json::from_slice(bytes)?;

    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove(ENVELOPE_KEY) {
            Some(Value::Array(items)) => items,
            _ => bail!("expected a \"{ENVELOPE_KEY}\" array in the payload"),
        },
        _ => bail!("expected a JSON array or object payload"),
    };

    let total = items.len();
    let records: Vec<RawGradeRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(fields) => Some(RawGradeRecord::new(fields)),
            _ => {
                debug!(index, "Skipping non-object grade entry");
                None
            }
        })
        .collect();

    debug!(total, records = records.len(), "Grade payload decoded");
    Ok(records)
}
