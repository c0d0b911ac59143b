//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use tempora_api::Output;

/// Markdown formatter - one section per document, entities as a list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    entity_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entity_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, source: &str, output: &Output) -> Result<()> {
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        for (number, entity) in output.entities.iter().enumerate() {
            self.entity_count += 1;
            writeln!(
                self.writer,
                "{}. **{}** `{}` (chars {}-{})",
                number + 1,
                entity.text,
                entity.label,
                entity.start_char,
                entity.end_char
            )?;
            for series in &entity.time_series {
                writeln!(
                    self.writer,
                    "   - {} → {}",
                    series.start_uri, series.end_uri
                )?;
            }
        }
        for diagnostic in &output.diagnostics {
            writeln!(self.writer, "> {}: {}", diagnostic.kind, diagnostic.message)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total entities: {}*", self.entity_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
