/// Output formatting for `genome extract`
///
/// - JSON: one pretty-printed summary (or a path-keyed object for several files)
/// - NDJSON: one `{"path", "summary"}` line per file, written as it arrives
use crate::extractors::StructuralSummary;
use anyhow::Result;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Ndjson,
}

#[derive(Serialize)]
struct Record<'a> {
    path: &'a str,
    summary: &'a StructuralSummary,
}

pub struct OutputWriter<W: Write> {
    format: OutputFormat,
    writer: W,
    buffer: Vec<(String, StructuralSummary)>,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(format: OutputFormat, writer: W) -> Self {
        Self {
            format,
            writer,
            buffer: Vec::new(),
        }
    }

    pub fn write_summary(&mut self, path: &str, summary: &StructuralSummary) -> Result<()> {
        match self.format {
            OutputFormat::Ndjson => {
                writeln!(self.writer, "{}", serde_json::to_string(&Record { path, summary })?)?;
                self.writer.flush()?;
            }
            OutputFormat::Json => self.buffer.push((path.to_string(), summary.clone())),
        }
        Ok(())
    }

    /// Write anything buffered and hand the writer back
    pub fn finish(mut self) -> Result<W> {
        if self.format == OutputFormat::Json && !self.buffer.is_empty() {
            let json = if self.buffer.len() == 1 {
                serde_json::to_string_pretty(&self.buffer[0].1)?
            } else {
                let mut object = Map::new();
                for (path, summary) in &self.buffer {
                    object.insert(path.clone(), serde_json::to_value(summary)?);
                }
                serde_json::to_string_pretty(&Value::Object(object))?
            };
            writeln!(self.writer, "{}", json)?;
            self.writer.flush()?;
        }
        Ok(self.writer)
    }
}
