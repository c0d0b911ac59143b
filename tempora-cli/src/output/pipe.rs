//! Pipe-delimited output formatter
//!
//! One row per bound time series, with the edge URIs and period URIs
//! rendered as bracketed lists. Entities without semantics get a row that
//! repeats their text and leaves both lists empty.

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use tempora_api::{Output, TimeSeriesDTO};

/// Column header written before the first row
pub const HEADER: &str = "input value|prepared value|normalized edge values|normalized values";

/// Pipe formatter - one row per time series
pub struct PipeFormatter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> PipeFormatter<W> {
    /// Create a new pipe formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "{HEADER}")?;
            self.header_written = true;
        }
        Ok(())
    }
}

/// Render one time series as a row
pub fn series_row(series: &TimeSeriesDTO) -> String {
    format!(
        "{}|{}|[{{start={}, end={}}}]|[{}]",
        series.input_value,
        series.prepared_value,
        series.start_uri,
        series.end_uri,
        series.periods.join(", ")
    )
}

/// Row for an entity without semantics
pub fn empty_row(text: &str) -> String {
    format!("{text}|{text}|[]|[]")
}

impl<W: Write + Send + Sync> OutputFormatter for PipeFormatter<W> {
    fn format_document(&mut self, _source: &str, output: &Output) -> Result<()> {
        self.write_header()?;
        for entity in &output.entities {
            if entity.time_series.is_empty() {
                writeln!(self.writer, "{}", empty_row(&entity.text))?;
            }
            for series in &entity.time_series {
                writeln!(self.writer, "{}", series_row(series))?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
