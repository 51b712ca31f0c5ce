//! Run report output.
//!
//! A [`RunReport`] can be written as pretty or single-line JSON to any
//! writer, or to a path where `-` means stdout.

use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::RunReport;

/// Serializes reports as JSON.
pub struct ReportWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W, pretty: bool) -> Self {
        Self { writer, pretty }
    }

    /// Write one item followed by a newline.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, item).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

/// Write `report` to `target`; `-` writes to stdout.
pub fn write_report(report: &RunReport, target: &Path, pretty: bool) -> Result<()> {
    if target.as_os_str() == "-" {
        let stdout = io::stdout();
        ReportWriter::new(stdout.lock(), pretty).write(report)?;
    } else {
        let file = std::fs::File::create(target)?;
        ReportWriter::new(io::BufWriter::new(file), pretty).write(report)?;
    }
    Ok(())
}
