use std::io::{self, Write};

use camino::Utf8Path;
use serde::Serialize;

use crate::app::{ConversionStats, ProgressEvent, ProgressSink};
use crate::document::Document;
use crate::error::PanresError;
use crate::fs_util::write_bytes_atomic;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

/// Serializes the document as pretty JSON (2-space indent, UTF-8, non-ASCII
/// left as-is) and writes it atomically. Returns the size in bytes.
pub fn write_document(path: &Utf8Path, document: &Document) -> Result<u64, PanresError> {
    let mut json = serde_json::to_vec_pretty(document)
        .map_err(|err| PanresError::Serialize(err.to_string()))?;
    json.push(b'\n');
    write_bytes_atomic(path, &json)?;
    Ok(json.len() as u64)
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_stats(stats: &ConversionStats) -> io::Result<()> {
        Self::print_json(stats)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl ProgressSink for JsonOutput {
    fn event(&self, _event: ProgressEvent) {}
}

pub struct TextOutput;

impl TextOutput {
    pub fn print_stats(stats: &ConversionStats) -> io::Result<()> {
        let mut stdout = io::stdout();
        Self::write_stats(&mut stdout, stats)
    }

    pub fn write_stats<W: Write>(out: &mut W, stats: &ConversionStats) -> io::Result<()> {
        let green = "\x1b[32m";
        let cyan = "\x1b[36m";
        let reset = "\x1b[0m";

        writeln!(out, "{cyan}=== Conversion Statistics ==={reset}")?;
        writeln!(out, "Total triples: {}", stats.total_triples)?;
        writeln!(out, "Total subjects: {}", stats.total_subjects)?;
        for entry in &stats.categories {
            writeln!(out, "{}: {}", entry.category, entry.count)?;
        }
        writeln!(
            out,
            "Sequences: {} genes, {} proteins",
            stats.gene_sequences, stats.protein_sequences
        )?;
        writeln!(
            out,
            "{green}Done! JSON file created: {} ({:.2} MB){reset}",
            stats.output_path,
            stats.output_bytes as f64 / 1024.0 / 1024.0
        )?;
        Ok(())
    }
}
