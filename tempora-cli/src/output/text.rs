//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::{self, Write};
use tempora_api::Output;

/// Plain text formatter - one entity per line
///
/// Columns are tab separated: source, char range, label, text, and one
/// `start..end` column per bound time series.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, source: &str, output: &Output) -> Result<()> {
        for entity in &output.entities {
            write!(
                self.writer,
                "{source}\t{}-{}\t{}\t{}",
                entity.start_char, entity.end_char, entity.label, entity.text
            )?;
            for series in &entity.time_series {
                write!(self.writer, "\t{}..{}", series.start_uri, series.end_uri)?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_one_line_per_entity() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_document("a.txt", &fixtures::output()).unwrap();
        formatter.finish().unwrap();

        let text = String::from_utf8(formatter.writer).unwrap();
        assert_eq!(
            text,
            "a.txt\t0-10\tDATETIME\tSecolul XX\t\
             http://data.example.org/time/year/1901..http://data.example.org/time/year/2000\n"
        );
    }
}
