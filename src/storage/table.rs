//! CSV encoding of the task store.
//!
//! One header row with the fixed column names, then one row per task.
//! Quoting of embedded commas, quotes and newlines follows RFC 4180.

use crate::error::Result;
use crate::model::Task;
use std::io::{Read, Write};

/// Column names, in store order.
pub const HEADER: [&str; 10] = [
    "task_id",
    "title",
    "category",
    "status",
    "complexity",
    "estimated_time",
    "dependencies",
    "spec_path",
    "updated_at",
    "notes",
];

/// Encode tasks as CSV text, header first, in the given order.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized.
pub fn encode(tasks: &[Task]) -> Result<String> {
    let mut buf = Vec::new();
    write(&mut buf, tasks)?;
    // Every field is written from a `String`, so the output is valid UTF-8.
    String::from_utf8(buf).map_err(|e| crate::error::Error::Other(e.to_string()))
}

/// Write tasks as CSV to `writer`.
///
/// The header is written explicitly so an empty store still carries it.
///
/// # Errors
///
/// Returns an error if writing or serialization fails.
pub fn write<W: Write>(writer: W, tasks: &[Task]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(HEADER)?;
    for task in tasks {
        writer.serialize(task)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read tasks from CSV.
///
/// Columns are matched by header name, so column order in hand-edited
/// stores does not matter.
///
/// # Errors
///
/// Returns an error if the CSV is malformed, a required column is
/// missing, or a status/timestamp value is invalid.
pub fn read<R: Read>(reader: R) -> Result<Vec<Task>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut tasks = Vec::new();
    for record in reader.deserialize() {
        let task: Task = record?;
        tasks.push(task);
    }
    Ok(tasks)
}
