//! CSV report output
//!
//! The page report and the summary export are plain CSV with a header row.
//! Headers are written explicitly so an empty report still carries them.

use crate::output::report::{ReportRow, SummaryRow, REPORT_HEADERS, SUMMARY_HEADERS};
use crate::output::traits::{OutputResult, ReportSink};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Report sink writing CSV rows
pub struct CsvReportSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvReportSink<File> {
    /// Creates (or truncates) a report file and writes its header row
    pub fn from_path(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvReportSink<W> {
    /// Wraps any writer and writes the header row
    ///
    /// Used for in-memory buffers as well as files.
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let writer = header_writer(inner, &REPORT_HEADERS)?;
        Ok(Self { writer })
    }

    /// Flushes and returns the wrapped writer
    pub fn into_inner(self) -> OutputResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::output::OutputError::Write(e.to_string()))
    }
}

impl<W: Write> ReportSink for CsvReportSink<W> {
    fn write_row(&mut self, row: &ReportRow) -> OutputResult<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the per-category summary export
pub fn write_summary(path: &Path, rows: &[SummaryRow]) -> OutputResult<()> {
    write_csv(File::create(path)?, &SUMMARY_HEADERS, rows)
}

/// Reads a page report written by [`CsvReportSink`]
pub fn read_report_rows(path: &Path) -> OutputResult<Vec<ReportRow>> {
    read_csv(File::open(path)?)
}

/// Writes serializable rows under an explicit header row
pub fn write_csv<W: Write, T: Serialize>(inner: W, headers: &[&str], rows: &[T]) -> OutputResult<()> {
    let mut writer = header_writer(inner, headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads every row of a headed CSV stream
pub fn read_csv<R: Read, T: DeserializeOwned>(inner: R) -> OutputResult<Vec<T>> {
    let mut reader = csv::Reader::from_reader(inner);
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn header_writer<W: Write>(inner: W, headers: &[&str]) -> OutputResult<csv::Writer<W>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(inner);
    writer.write_record(headers)?;
    Ok(writer)
}
