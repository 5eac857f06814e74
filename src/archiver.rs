use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::ScrapeError;

/// Two-space indented JSON with non-ASCII text left as is.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// The one-line `{"error": ...}` object printed when a scrape fails.
#[must_use]
pub fn error_json(message: &str) -> String {
    format!("{{\"error\": {}}}", Value::String(message.to_string()))
}

pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<(), ScrapeError> {
    writer.write_all(to_pretty_json(value)?.as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn save_to_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<(), ScrapeError> {
    let mut file = File::create(path)?;
    write_json(&mut file, value)
}
