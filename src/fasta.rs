use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use camino::Utf8Path;
use flate2::read::MultiGzDecoder;
use tracing::{info, warn};

use crate::error::PanresError;

/// Sequence identifier → concatenated sequence.
pub type SequenceMap = HashMap<String, String>;

/// Loads a FASTA file (optionally gzip-compressed). A missing file is not an
/// error: it is reported and yields an empty map.
pub fn load_fasta(path: &Utf8Path) -> Result<SequenceMap, PanresError> {
    if !path.as_std_path().exists() {
        warn!("FASTA file not found: {path}");
        return Ok(SequenceMap::new());
    }

    info!("parsing FASTA file: {path}");
    let file = File::open(path.as_std_path())
        .map_err(|err| PanresError::FastaRead(format!("{path}: {err}")))?;
    let sequences = if path.extension() == Some("gz") {
        parse_fasta(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        parse_fasta(BufReader::new(file))
    }
    .map_err(|err| PanresError::FastaRead(format!("{path}: {err}")))?;

    info!(sequences = sequences.len(), "parsed {path}");
    Ok(sequences)
}

pub fn parse_fasta<R: BufRead>(reader: R) -> io::Result<SequenceMap> {
    let mut sequences = SequenceMap::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                sequences.insert(id, std::mem::take(&mut current_seq));
            }
            current_id = header
                .split_whitespace()
                .next()
                .map(|token| record_id(token).to_string());
        } else if current_id.is_some() {
            current_seq.push_str(line);
        }
    }

    if let Some(id) = current_id {
        sequences.insert(id, current_seq);
    }
    Ok(sequences)
}

/// Identical variants are published as `<id>_v<version>_identical`; they share
/// the record of `<id>`.
pub fn record_id(token: &str) -> &str {
    if token.contains("_v") && token.contains("_identical") {
        return token.split("_v").next().unwrap_or(token);
    }
    token
}
